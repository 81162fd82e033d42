use std::{
    io::Cursor,
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse},
    routing::get,
};
use axum_test::TestServer;
use image::{DynamicImage, ImageBuffer, ImageFormat, RgbImage};
use podline_config::{
    Config, loader::compose_config, models::sources::EnvConfig,
};
use podline_server::{AppState, create_app};

pub const COVER_RGB: [u8; 3] = [51, 102, 153];

/// Local stand-in for a podcast host: episode pages plus cover art.
#[derive(Debug)]
pub struct Origin {
    pub addr: SocketAddr,
    image_requests: Arc<AtomicUsize>,
}

impl Origin {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn image_requests(&self) -> usize {
        self.image_requests.load(Ordering::SeqCst)
    }
}

fn episode_page(image: Option<&str>) -> Html<String> {
    let image_tag = image
        .map(|src| format!(r#"<meta property="og:image" content="{src}">"#))
        .unwrap_or_default();
    Html(format!(
        r#"<!doctype html><html><head>
            <meta property="og:title" content="Ep 42">
            {image_tag}
            <meta property="og:description" content="《My Show》 discusses X">
        </head><body></body></html>"#
    ))
}

fn cover_png() -> Vec<u8> {
    let image: RgbImage = ImageBuffer::from_pixel(16, 16, image::Rgb(COVER_RGB));
    let mut png = Vec::new();
    DynamicImage::ImageRgb8(image)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .expect("encode cover");
    png
}

async fn cover(State(hits): State<Arc<AtomicUsize>>) -> impl IntoResponse {
    hits.fetch_add(1, Ordering::SeqCst);
    ([(header::CONTENT_TYPE, "image/png")], cover_png())
}

async fn missing_cover(State(hits): State<Arc<AtomicUsize>>) -> StatusCode {
    hits.fetch_add(1, Ordering::SeqCst);
    StatusCode::NOT_FOUND
}

pub async fn spawn_origin() -> Origin {
    let image_requests = Arc::new(AtomicUsize::new(0));

    let app = Router::new()
        .route("/episode", get(|| async { episode_page(Some("/cover.png")) }))
        .route("/no-cover", get(|| async { episode_page(None) }))
        .route(
            "/broken-cover",
            get(|| async { episode_page(Some("/missing.png")) }),
        )
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                episode_page(Some("/cover.png"))
            }),
        )
        .route("/gone", get(|| async { StatusCode::GONE }))
        .route("/cover.png", get(cover))
        .route("/missing.png", get(missing_cover))
        .with_state(Arc::clone(&image_requests));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind origin");
    let addr = listener.local_addr().expect("origin address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("origin server");
    });

    Origin {
        addr,
        image_requests,
    }
}

pub fn test_config() -> Config {
    let mut config = compose_config(None, EnvConfig::default(), None)
        .expect("default config")
        .config;
    config.server.host = "127.0.0.1".into();
    config.server.port = 0;
    config.dev_mode = true;
    config.fetch.timeout = Duration::from_secs(2);
    config
}

pub fn test_server(config: Config) -> TestServer {
    let state = AppState::from_config(config).expect("app state");
    TestServer::new(create_app(state)).expect("test server")
}
