//! # Module Commands

use serde::Serialize;
use tracing::debug;

use batoi_core::module_image;

use super::{lift, report};
use crate::context::AppContext;
use crate::error::AppResult;

/// A course module as the selector shows it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleView {
    pub code: String,
    pub literal: String,
    /// Cover used for books of this module added without a photo
    pub image: String,
}

/// Reloads and lists the course modules.
pub async fn list_modules(ctx: &AppContext) -> AppResult<Vec<ModuleView>> {
    debug!("list_modules command");
    report(ctx, lift(ctx.modules.refresh().await))?;

    Ok(ctx
        .modules
        .modules()
        .into_iter()
        .map(|m| ModuleView {
            image: module_image(&m.code).to_string(),
            literal: ctx.modules.literal(&m.code),
            code: m.code,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::test_support::{context, module};
    use batoi_api::ClientError;

    #[tokio::test]
    async fn test_list_modules_with_images() {
        let (ctx, api) = context(vec![]).await;
        *api.modules.lock().unwrap() = vec![
            module("0021", "Sistemas informáticos"),
            module("0999", "Optativa"),
        ];

        let modules = list_modules(&ctx).await.unwrap();

        assert_eq!(modules.len(), 2);
        assert_eq!(modules[0].literal, "Sistemas informáticos");
        assert_eq!(modules[0].image, "9788448635015.jpg");
        assert_eq!(modules[1].image, "logoBatoi.png");
    }

    #[tokio::test]
    async fn test_list_modules_failure() {
        let (ctx, api) = context(vec![]).await;
        api.fail(ClientError::Timeout);

        let err = list_modules(&ctx).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::RemoteError);
        assert_eq!(ctx.modules.last_error().as_deref(), Some("Request timed out"));
    }
}
