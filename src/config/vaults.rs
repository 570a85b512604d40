//! Seed configuration for the five vaults
//!
//! The vault list and theme bundles are static data, not behavior. Each
//! entry is a plain record in [`SEED_VAULTS`]; [`seed_vaults`] turns the
//! table into live ledgers at startup.

use crate::domain::core::Rgb;
use crate::domain::vault::{BannerIcon, Vault, VaultTheme};

/// One row of the static vault table
#[derive(Debug, Clone, Copy)]
pub struct VaultSeed {
    pub id: &'static str,
    pub name: &'static str,
    pub subtitle: &'static str,
    pub balance: f64,
    pub primary: Rgb,
    pub secondary: Rgb,
    pub accent: Rgb,
    pub background: Rgb,
    pub coin_palette: [Rgb; 5],
    pub banner_icon: BannerIcon,
}

impl VaultSeed {
    /// Builds a live vault from this seed row
    pub fn build(&self) -> Vault {
        Vault::new(
            self.id,
            self.name,
            self.subtitle,
            self.balance,
            VaultTheme {
                primary: self.primary,
                secondary: self.secondary,
                accent: self.accent,
                background: self.background,
                coin_palette: self.coin_palette.to_vec(),
                banner_icon: self.banner_icon,
            },
        )
    }
}

/// The five preconfigured vaults, in presentation order
pub const SEED_VAULTS: [VaultSeed; 5] = [
    VaultSeed {
        id: "royal",
        name: "The Royal Vault",
        subtitle: "Managed by the Royal Treasury",
        balance: 100.0,
        primary: Rgb::from_u32(0xd4af37),
        secondary: Rgb::from_u32(0x8b4513),
        accent: Rgb::from_u32(0xffd700),
        background: Rgb::from_u32(0x1a120b),
        coin_palette: [
            Rgb::from_u32(0xffd700),
            Rgb::from_u32(0xffc700),
            Rgb::from_u32(0xdaa520),
            Rgb::from_u32(0xb8860b),
            Rgb::from_u32(0xe6b422),
        ],
        banner_icon: BannerIcon::Royal,
    },
    VaultSeed {
        id: "iron",
        name: "The Iron Bank",
        subtitle: "The Iron Bank Will Have Its Due",
        balance: 50.0,
        primary: Rgb::from_u32(0xa19d94),
        secondary: Rgb::from_u32(0x2c3e50),
        accent: Rgb::from_u32(0xecf0f1),
        background: Rgb::from_u32(0x1c2833),
        coin_palette: [
            Rgb::from_u32(0xbdc3c7),
            Rgb::from_u32(0x95a5a6),
            Rgb::from_u32(0x7f8c8d),
            Rgb::from_u32(0xdcdde1),
            Rgb::from_u32(0x718093),
        ],
        banner_icon: BannerIcon::Bank,
    },
    VaultSeed {
        id: "forest",
        name: "Druid Grove",
        subtitle: "Offerings to the Great Oak",
        balance: 10.0,
        primary: Rgb::from_u32(0x2d5a27),
        secondary: Rgb::from_u32(0x3d2b1f),
        accent: Rgb::from_u32(0x78e08f),
        background: Rgb::from_u32(0x0f1d0e),
        coin_palette: [
            Rgb::from_u32(0x20bf6b),
            Rgb::from_u32(0x26de81),
            Rgb::from_u32(0x218c74),
            Rgb::from_u32(0x33d9b2),
            Rgb::from_u32(0x009432),
        ],
        banner_icon: BannerIcon::Grove,
    },
    VaultSeed {
        id: "dragon",
        name: "Dragon Hoard",
        subtitle: "Blood Gold of the Ancient Worm",
        balance: 500.0,
        primary: Rgb::from_u32(0xc0392b),
        secondary: Rgb::from_u32(0x4a235a),
        accent: Rgb::from_u32(0xe67e22),
        background: Rgb::from_u32(0x1b0d0d),
        coin_palette: [
            Rgb::from_u32(0xeb4d4b),
            Rgb::from_u32(0xff7979),
            Rgb::from_u32(0xf0932b),
            Rgb::from_u32(0xffbe76),
            Rgb::from_u32(0xc0392b),
        ],
        banner_icon: BannerIcon::Dragon,
    },
    VaultSeed {
        id: "shadow",
        name: "Shadow Crate",
        subtitle: "Treasures Plucked from the Void",
        balance: 0.0,
        primary: Rgb::from_u32(0x8e44ad),
        secondary: Rgb::from_u32(0x2c3e50),
        accent: Rgb::from_u32(0x9b59b6),
        background: Rgb::from_u32(0x0d0d0d),
        coin_palette: [
            Rgb::from_u32(0x4834d4),
            Rgb::from_u32(0x686de0),
            Rgb::from_u32(0xbe2edd),
            Rgb::from_u32(0xe056fd),
            Rgb::from_u32(0x30336b),
        ],
        banner_icon: BannerIcon::Shadow,
    },
];

/// Builds the live vault list from the seed table
pub fn seed_vaults() -> Vec<Vault> {
    SEED_VAULTS.iter().map(VaultSeed::build).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_vaults_are_seeded() {
        assert_eq!(seed_vaults().len(), 5);
    }

    #[test]
    fn seed_ids_are_unique() {
        let vaults = seed_vaults();
        for (i, a) in vaults.iter().enumerate() {
            for b in &vaults[i + 1..] {
                assert_ne!(a.id, b.id, "duplicate vault id {}", a.id);
            }
        }
    }

    #[test]
    fn royal_vault_matches_table() {
        let vaults = seed_vaults();
        let royal = &vaults[0];

        assert_eq!(royal.id, "royal");
        assert_eq!(royal.name, "The Royal Vault");
        assert_eq!(royal.balance, 100.0);
        assert_eq!(royal.theme.coin_palette.len(), 5);
        assert!(royal.transactions().is_empty());
    }

    #[test]
    fn shadow_vault_starts_empty() {
        let vaults = seed_vaults();
        assert_eq!(vaults[4].id, "shadow");
        assert_eq!(vaults[4].balance, 0.0);
    }
}
