//! Shared application state for the Convoy gateway.

use std::sync::Arc;

use crate::auth::IdentityVerifier;
use crate::config::GatewayConfig;
use crate::dispatch::Dispatcher;
use crate::realtime::RealtimeCore;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    core: Arc<RealtimeCore>,
    dispatcher: Dispatcher,
    store: Arc<dyn Store>,
    verifier: Arc<dyn IdentityVerifier>,
}

impl AppState {
    pub fn new(
        cfg: GatewayConfig,
        store: Arc<dyn Store>,
        verifier: Arc<dyn IdentityVerifier>,
    ) -> Self {
        let core = Arc::new(RealtimeCore::new());
        let dispatcher = Dispatcher::new(Arc::clone(&store), Arc::clone(&core));
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                core,
                dispatcher,
                store,
                verifier,
            }),
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn core(&self) -> &Arc<RealtimeCore> {
        &self.inner.core
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.inner.dispatcher
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.inner.store
    }

    pub fn verifier(&self) -> &Arc<dyn IdentityVerifier> {
        &self.inner.verifier
    }
}
