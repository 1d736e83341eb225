//! Tokio runtime and Wiremock helpers for GitHub-backed integration tests.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use rstest_bdd::Slot;
use tokio::runtime::Runtime;
use wiremock::MockServer;

/// Placeholder host in feature files, replaced by the mock server address.
pub const SERVER_PLACEHOLDER: &str = "SERVER";

/// Shared runtime wrapper that can be stored in an `rstest-bdd` Slot.
#[derive(Clone)]
pub struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    pub fn new(runtime: Runtime) -> Self {
        Self(Rc::new(RefCell::new(runtime)))
    }

    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

/// Ensures a Tokio runtime and Wiremock server are initialised.
///
/// # Errors
///
/// Returns an error if the Tokio runtime cannot be created or if the slots behave unexpectedly.
pub fn ensure_runtime_and_server(
    runtime: &Slot<SharedRuntime>,
    server: &Slot<MockServer>,
) -> Result<SharedRuntime, io::Error> {
    if runtime.with_ref(|_| ()).is_none() {
        runtime.set(SharedRuntime::new(Runtime::new()?));
    }

    let shared_runtime = runtime
        .get()
        .ok_or_else(|| io::Error::other("runtime not initialised after set"))?;

    if server.with_ref(|_| ()).is_none() {
        server.set(shared_runtime.block_on(MockServer::start()));
    }

    Ok(shared_runtime)
}

/// Substitutes the mock server address into a quoted feature-file URL.
///
/// `http://SERVER/owner/repo/pull/1` becomes
/// `http://127.0.0.1:<port>/owner/repo/pull/1`; since the host is not
/// `github.com`, the API base resolves to `<server>/api/v3`.
pub fn resolve_server_url(server_url: &str, template: &str) -> String {
    let cleaned = template.trim_matches('"');
    if cleaned.contains("://SERVER") {
        cleaned
            .replace("https://SERVER", server_url)
            .replace("http://SERVER", server_url)
    } else {
        cleaned.replace(SERVER_PLACEHOLDER, server_url)
    }
}
