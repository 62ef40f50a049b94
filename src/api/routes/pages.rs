use actix_files::NamedFile;
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{get, web, HttpRequest};
use tracing::{debug, info};

use crate::state::AppState;
use crate::utils::error::{AppError, Result};
use crate::utils::helpers::resolve_in_directory;
use crate::utils::security::SESSION_COOKIE;

async fn render_page(state: &AppState, page: &str) -> Result<NamedFile> {
    let path = state.config.templates_dir.join(page);
    NamedFile::open_async(&path).await.map_err(|e| {
        debug!("Page {:?} introuvable: {}", path, e);
        AppError::PageNotFound(page.to_string())
    })
}

/// Page d'accueil
#[get("/")]
pub async fn home(state: web::Data<AppState>) -> Result<NamedFile> {
    render_page(&state, "index.html").await
}

/// Tableau de bord ouvert après connexion
#[get("/indexing")]
pub async fn premium_page(req: HttpRequest, state: web::Data<AppState>) -> Result<NamedFile> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        match state.sessions.verify(cookie.value()) {
            Ok(data) => info!(user = %data.claims.sub, "Tableau de bord ouvert"),
            Err(e) => debug!("Session ignorée: {}", e),
        }
    }

    render_page(&state, "indexing.html").await
}

/// Téléchargement d'un jeu de données généré par `train-models`
#[get("/download/{filename}")]
pub async fn download_file(path: web::Path<String>, state: web::Data<AppState>) -> Result<NamedFile> {
    let filename = path.into_inner();

    let file_path = resolve_in_directory(&state.config.datasets_dir, &filename)
        .filter(|p| p.is_file())
        .ok_or(AppError::FileNotFound)?;

    let file = NamedFile::open_async(&file_path)
        .await
        .map_err(|_| AppError::FileNotFound)?;

    Ok(file.set_content_disposition(ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![DispositionParam::Filename(filename)],
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Config;
    use actix_web::http::{header, StatusCode};
    use actix_web::{test, App};
    use std::fs;

    fn config_in(dir: &std::path::Path) -> Config {
        Config {
            datasets_dir: dir.join("datasets"),
            templates_dir: dir.join("templates"),
            ..Config::default()
        }
    }

    #[actix_web::test]
    async fn test_download_existing_dataset_as_attachment() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        fs::create_dir_all(&config.datasets_dir).unwrap();
        fs::write(config.datasets_dir.join("energy_data.csv"), "hour,consumption\n9,110\n").unwrap();

        let (state, _) = AppState::new_test(config);
        let app = test::init_service(App::new().app_data(web::Data::new(state)).service(download_file)).await;

        let req = test::TestRequest::get().uri("/download/energy_data.csv").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let disposition = resp.headers().get(header::CONTENT_DISPOSITION).unwrap().to_str().unwrap().to_string();
        assert!(disposition.starts_with("attachment"));
        assert!(disposition.contains("energy_data.csv"));

        let body = test::read_body(resp).await;
        assert_eq!(&body[..], b"hour,consumption\n9,110\n");
    }

    #[actix_web::test]
    async fn test_missing_file_is_404_text() {
        let dir = tempfile::tempdir().unwrap();
        let (state, _) = AppState::new_test(config_in(dir.path()));
        let app = test::init_service(App::new().app_data(web::Data::new(state)).service(download_file)).await;

        let req = test::TestRequest::get().uri("/download/nothing.csv").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body = test::read_body(resp).await;
        assert_eq!(&body[..], b"File not found!");
    }

    #[actix_web::test]
    async fn test_traversal_is_404() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        fs::create_dir_all(&config.datasets_dir).unwrap();
        fs::write(dir.path().join("secret.txt"), "top secret").unwrap();

        let (state, _) = AppState::new_test(config);
        let app = test::init_service(App::new().app_data(web::Data::new(state)).service(download_file)).await;

        // Segment encodé: la résolution ne doit jamais sortir de datasets/
        let req = test::TestRequest::get().uri("/download/..%2Fsecret.txt").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_pages_served_from_templates() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        fs::create_dir_all(&config.templates_dir).unwrap();
        fs::write(config.templates_dir.join("index.html"), "<h1>Accueil</h1>").unwrap();

        let (state, _) = AppState::new_test(config);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(home)
                .service(premium_page),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(&test::read_body(resp).await[..], b"<h1>Accueil</h1>");

        // indexing.html absent
        let resp = test::call_service(&app, test::TestRequest::get().uri("/indexing").to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
