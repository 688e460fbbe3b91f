use dials::config;
use dials::gui::app::AppModel;
use dials::sys::runtime;
use relm4::prelude::*;

fn main() {
    env_logger::init();

    let config = config::load_or_setup();

    let (tx, rx) = async_channel::bounded(64);

    // Start Background Services
    runtime::start_background_services(tx, config.heading.clone());

    let app = RelmApp::new("org.gyre.dials");

    app.run::<AppModel>((config, rx));
}
