use serde::Serialize;

pub const FALLBACK_MEMBERS: i64 = 500;
pub const PARTNERS: i64 = 50;
pub const YEARS_ACTIVE: i64 = 5;

/// Raw counts read from the database.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct ResourceCounts {
    pub events: i64,
    pub approved_members: i64,
    pub team_members: i64,
    pub gallery_images: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SiteStats {
    pub events: i64,
    pub members: i64,
    pub team_members: i64,
    pub gallery_images: i64,
    pub partners: i64,
    pub years: i64,
}

impl From<ResourceCounts> for SiteStats {
    fn from(counts: ResourceCounts) -> Self {
        SiteStats {
            events: counts.events,
            members: if counts.approved_members > 0 { counts.approved_members } else { FALLBACK_MEMBERS },
            team_members: counts.team_members,
            gallery_images: counts.gallery_images,
            partners: PARTNERS,
            years: YEARS_ACTIVE,
        }
    }
}

impl Default for SiteStats {
    fn default() -> Self {
        ResourceCounts::default().into()
    }
}
