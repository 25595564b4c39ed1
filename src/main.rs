use auralis::app::App;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Failed to initialize logging: {}", e).into());
    }
    log::info!("Auralis starting");

    leptos::mount::mount_to_body(App);
}
