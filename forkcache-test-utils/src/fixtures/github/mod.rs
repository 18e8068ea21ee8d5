use crate::TestContext;

pub mod factory;
pub mod mockito;

impl TestContext {
    pub fn github<'a>(&'a mut self) -> GitHubFixtures<'a> {
        GitHubFixtures { setup: self }
    }
}

pub struct GitHubFixtures<'a> {
    pub setup: &'a mut TestContext,
}
