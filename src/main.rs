use krst::run_gui;

fn main() -> eframe::Result {
    env_logger::init();
    run_gui()
}
