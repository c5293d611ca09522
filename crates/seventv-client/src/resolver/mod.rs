//! Cosmetics resolution pipeline.
//!
//! Login -> Twitch ID (if needed), Twitch ID -> 7TV user record, then the
//! record's style block -> normalized paint and badges. Steps run one after
//! another; only identity lookup errors that are not "not found" escape.


use serde::Serialize;

use crate::ClientError;
use crate::api::SevenTvClient;
use crate::cosmetics::{
    Badge, BadgeSource, Paint, PaintSource, badge_source, normalize_badge, normalize_badges,
    normalize_paint, paint_source,
};
use crate::identity::IdentityClient;

/// Who to look up. At least one of the two identifiers is always set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserQuery {
    id: Option<String>,
    login: Option<String>,
}

impl UserQuery {
    /// Build a query from raw request parameters.
    ///
    /// Blank values count as missing; `None` if both are missing.
    pub fn from_params(user_id: Option<&str>, login: Option<&str>) -> Option<Self> {
        let clean = |v: Option<&str>| {
            v.map(str::trim)
                .filter(|s| !s.is_empty())
                .map(ToOwned::to_owned)
        };
        let id = clean(user_id);
        let login = clean(login);
        if id.is_none() && login.is_none() {
            return None;
        }
        Some(Self { id, login })
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn login(&self) -> Option<&str> {
        self.login.as_deref()
    }
}

/// Cosmetics resolved for one user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedCosmetics {
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub paint: Option<Paint>,
    pub badges: Vec<Badge>,
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Twitch user ID could not be resolved")]
    IdentityNotFound,

    #[error("7TV user not found")]
    UserNotFound,

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Resolves a [`UserQuery`] into [`ResolvedCosmetics`].
#[derive(Debug, Clone)]
pub struct CosmeticsResolver {
    identity: IdentityClient,
    seventv: SevenTvClient,
}

impl CosmeticsResolver {
    pub fn new(identity: IdentityClient, seventv: SevenTvClient) -> Self {
        Self { identity, seventv }
    }

    pub async fn resolve(&self, query: &UserQuery) -> Result<ResolvedCosmetics, ResolveError> {
        let user_id = match (query.id(), query.login()) {
            (Some(id), _) => id.to_string(),
            (None, Some(login)) => self
                .identity
                .resolve_user_id(login)
                .await?
                .ok_or(ResolveError::IdentityNotFound)?,
            (None, None) => return Err(ResolveError::IdentityNotFound),
        };

        let record = self
            .seventv
            .find_user(&user_id, query.login())
            .await
            .ok_or(ResolveError::UserNotFound)?;

        let style = record.style();
        let paint = self.resolve_paint(paint_source(style)).await;
        let badges = self.resolve_badges(badge_source(style)).await;

        tracing::debug!(
            user_id = %user_id,
            has_paint = paint.is_some(),
            badges = badges.len(),
            "Resolved 7TV cosmetics"
        );

        Ok(ResolvedCosmetics {
            login: record
                .username()
                .or(query.login())
                .map(ToOwned::to_owned),
            display_name: record.display_name().map(ToOwned::to_owned),
            user_id,
            paint,
            badges,
        })
    }

    async fn resolve_paint(&self, source: PaintSource<'_>) -> Option<Paint> {
        match source {
            PaintSource::Inline(raw) => normalize_paint(raw),
            PaintSource::Reference(id) => normalize_paint(&self.seventv.get_paint(&id).await?),
            PaintSource::Missing => None,
        }
    }

    async fn resolve_badges(&self, source: BadgeSource<'_>) -> Vec<Badge> {
        match source {
            BadgeSource::Inline(raw) => normalize_badges(raw),
            BadgeSource::Reference(id) => self
                .seventv
                .get_badge(&id)
                .await
                .and_then(|raw| normalize_badge(&raw))
                .into_iter()
                .collect(),
            BadgeSource::Missing => Vec::new(),
        }
    }
}
