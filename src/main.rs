use hoardkeeper::app::controller::AppController;
use hoardkeeper::ui::terminal;

fn main() {
    let controller = AppController::new();

    if let Err(err) = terminal::run(controller) {
        eprintln!("hoardkeeper: terminal failure: {err}");
        std::process::exit(1);
    }
}
