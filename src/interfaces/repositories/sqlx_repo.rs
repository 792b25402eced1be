use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxUserRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxEventRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxTeamRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxGalleryRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxMembershipRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxContactRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxStatsRepo {
    pub pool: PgPool,
}
