#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};
use linkreg::domain::clock::ManualClock;
use linkreg::domain::geo::{GeoInfo, GeoLocator};
use linkreg::infrastructure::cache::NullCache;
use linkreg::infrastructure::geoip::NullGeoLocator;
use linkreg::infrastructure::persistence::InMemoryStore;
use linkreg::routes::router;
use linkreg::state::{AppState, PublicSettings};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;

/// Peer address injected into every test request.
pub const PEER_IP: &str = "127.0.0.1";

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
}

/// Geolocator answering every lookup with the same location.
pub struct FixedGeoLocator {
    pub info: GeoInfo,
}

impl FixedGeoLocator {
    pub fn new(country: &str, region: &str) -> Self {
        Self {
            info: GeoInfo {
                country: Some(country.to_string()),
                region: Some(region.to_string()),
            },
        }
    }
}

#[async_trait]
impl GeoLocator for FixedGeoLocator {
    async fn lookup(&self, _ip: &str) -> Option<GeoInfo> {
        Some(self.info.clone())
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// A running test application over the in-memory store.
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub clock: ManualClock,
    pub store: Arc<InMemoryStore>,
}

pub fn create_test_state(
    store: Arc<InMemoryStore>,
    clock: ManualClock,
    geo: Arc<dyn GeoLocator>,
    settings: PublicSettings,
) -> AppState {
    AppState::new(
        store.clone(),
        store,
        Arc::new(NullCache::new()),
        geo,
        Arc::new(clock),
        settings,
    )
}

pub fn test_app() -> TestApp {
    test_app_with(PublicSettings::default(), Arc::new(NullGeoLocator))
}

pub fn test_app_with(settings: PublicSettings, geo: Arc<dyn GeoLocator>) -> TestApp {
    let store = Arc::new(InMemoryStore::new());
    let clock = ManualClock::new(start_time());
    let state = create_test_state(store.clone(), clock.clone(), geo, settings);

    let app = router(state.clone()).layer(MockConnectInfoLayer);
    let server = TestServer::new(app).unwrap();

    TestApp {
        server,
        state,
        clock,
        store,
    }
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = format!("{}:12345", PEER_IP).parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
