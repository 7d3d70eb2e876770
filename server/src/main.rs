#[macro_use]
extern crate rocket;

mod entrypoints;

use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

use user_stats_server::{
    api::github::GithubClient,
    config::Env,
    stats::{GithubStatsService, UserInfoComposer},
};

#[launch]
async fn rocket() -> _ {
    dotenv::dotenv().ok();

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer());
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let env = envy::from_env::<Env>().expect("Failed to load environment variables");
    let pool = Arc::new(
        env.credential_pool()
            .expect("Failed to load GitHub credentials"),
    );
    let github_client = GithubClient::new(&pool).expect("Failed to create GitHub client");
    tracing::info!("Loaded {} GitHub credentials", pool.len());

    let service = GithubStatsService::new(pool, Arc::new(github_client));
    let composer = UserInfoComposer::new(Arc::new(service));

    rocket::build()
        .manage(composer)
        .manage(entrypoints::Settings {
            all_time_default: env.all_time_default,
        })
        .attach(entrypoints::stage())
}
