// State fan-out to the backend hardware/emulation service

use log::debug;

use crate::arm::ArmState;
use crate::errors::ArmdeckError;

/// Receives the full arm state on every applied frame update. Pushes are
/// fire-and-forget: implementations must never block the frame loop, and
/// their failures never surface into playback or recording control flow.
pub trait StateSync: Send {
    fn push(&self, state: &ArmState);
}

/// Discards every update. Used when no backend is configured and in tests.
pub struct NullSync;

impl StateSync for NullSync {
    fn push(&self, _state: &ArmState) {}
}

/// POSTs the state as JSON to a backend endpoint from a background runtime.
/// Failures are logged at debug level and swallowed; an unreachable backend
/// just means the panel is in emulator mode.
pub struct HttpStateSync {
    runtime: tokio::runtime::Runtime,
    client: reqwest::Client,
    endpoint: String,
}

impl HttpStateSync {
    pub fn new(endpoint: String) -> Result<Self, ArmdeckError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .map_err(|e| ArmdeckError::SyncInitError { source: e })?;
        Ok(Self {
            runtime,
            client: reqwest::Client::new(),
            endpoint,
        })
    }
}

impl StateSync for HttpStateSync {
    fn push(&self, state: &ArmState) {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let body = state.clone();
        self.runtime.spawn(async move {
            match client.post(&endpoint).json(&body).send().await {
                Ok(response) if !response.status().is_success() => {
                    debug!("State sync rejected: {}", response.status());
                }
                Ok(_) => {}
                Err(e) => {
                    debug!("State sync unavailable (emulator mode): {}", e);
                }
            }
        });
    }
}
