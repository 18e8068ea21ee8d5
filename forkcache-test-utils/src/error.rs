use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestError {
    #[error(transparent)]
    GitHubError(#[from] github_api::Error),
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
}
