fn main() {
    // Backend URL and friends come from the environment; a local .env is a
    // dev convenience only.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();
    dioxus::launch(markforge::ui::App);
}
