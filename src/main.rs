use log::error;

#[rocket::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let rocket = match modhub::create_rocket() {
        Ok(rocket) => rocket,
        Err(e) => {
            error!("Failed to start modhub: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = rocket.launch().await {
        error!("modhub stopped with an error: {e}");
        std::process::exit(1);
    }
}
