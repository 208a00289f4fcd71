use std::sync::Arc;

use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use musicbox_common::BridgeError;
use serde_json::Value;
use tracing::{debug, error};

use super::AppInfo;
use crate::command::Request;
use crate::outcome::Outcome;
use crate::store::CookieStore;

/// One handler per request variant. Every error stops here: it is logged and
/// becomes a `Failure`.
pub(super) fn dispatch(
    info: AppInfo,
    store: Arc<dyn CookieStore>,
    request: Request,
) -> BoxFuture<'static, Outcome> {
    let command = request.command();
    async move {
        debug!(%command, "bridge request");
        let result = handle(&info, store.as_ref(), request).await;
        if let Err(e) = &result {
            error!(%command, error = %e, "bridge request failed");
        }
        Outcome::from(result)
    }
    .boxed()
}

async fn handle(
    info: &AppInfo,
    store: &dyn CookieStore,
    request: Request,
) -> Result<Value, BridgeError> {
    match request {
        Request::GetAppVersion => Ok(Value::String(info.version.clone())),
        Request::GetAppName => Ok(Value::String(info.name.clone())),
        Request::GetCookies { url } => records(store.get(&url).await?),
        Request::GetAllCookies => records(store.get_all().await?),
        Request::SetCookie(details) => {
            store.set(details).await?;
            Ok(Value::Bool(true))
        }
        Request::RemoveCookie { url, name } => {
            store.remove(&url, &name).await?;
            Ok(Value::Bool(true))
        }
        Request::ClearAllCookies => {
            store.clear().await?;
            Ok(Value::Bool(true))
        }
    }
}

fn records<T: serde::Serialize>(value: T) -> Result<Value, BridgeError> {
    serde_json::to_value(value).map_err(|e| BridgeError::Failed(format!("encode: {e}")))
}
