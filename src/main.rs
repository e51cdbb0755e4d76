use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use grade_class_predictor::{web as routes, Classifier, Config, LogisticModel};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;

    log::info!("Loading grade classifier from {}", config.model_path.display());
    let model = match LogisticModel::load(&config.model_path) {
        Ok(model) => model,
        Err(e) => {
            log::error!("Failed to load model: {e}");
            return Err(e.into());
        }
    };
    log::info!("Model ready ({} grade classes)", model.class_count());

    let classifier: Arc<dyn Classifier> = Arc::new(model);
    let classifier = web::Data::from(classifier);

    log::info!("Starting BrightPath predictor on http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(classifier.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))
    .with_context(|| format!("could not bind {}:{}", config.host, config.port))?
    .run()
    .await?;

    Ok(())
}
