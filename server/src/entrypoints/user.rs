use rocket::{serde::json::Json, State};
use user_stats_server::{stats::UserInfoComposer, UserInfo};

use super::{
    types::{api_error, ApiError},
    Settings,
};

#[get("/<username>?<all_time>")]
async fn get_user_info(
    username: &str,
    all_time: Option<bool>,
    composer: &State<UserInfoComposer>,
    settings: &State<Settings>,
) -> Result<Json<UserInfo>, ApiError> {
    let all_time = all_time.unwrap_or(settings.all_time_default);
    match composer.compose(username, all_time).await {
        Ok(info) => Ok(Json(info)),
        Err(e) => {
            rocket::error!("Failed to get user info: {username}: {e}");
            Err(api_error(e))
        }
    }
}

pub fn stage() -> rocket::fairing::AdHoc {
    rocket::fairing::AdHoc::on_ignite("Installing user entrypoints", |rocket| async {
        rocket.mount("/api/users/", rocket::routes![get_user_info])
    })
}
