pub mod health;

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{auth, bulk_upload, clubs};
use crate::state::AppState;

/// Build the directory's route tree.
///
/// ```text
/// POST   /login                          credential check
///
/// GET    /clubs                          list all clubs
/// POST   /addclub                        create one club
/// PUT    /updateclub/{id}                partial update
/// DELETE /deleteclub/{id}                delete
///
/// POST   /bulk-upload                    multipart CSV ingestion
/// POST   /bulk-upload/duplicates.csv     re-export rows as CSV
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/clubs", get(clubs::list))
        .route("/addclub", post(clubs::create))
        .route("/updateclub/{id}", put(clubs::update))
        .route("/deleteclub/{id}", delete(clubs::delete))
        .route("/bulk-upload", post(bulk_upload::upload))
        .route("/bulk-upload/duplicates.csv", post(bulk_upload::duplicates_csv))
}
