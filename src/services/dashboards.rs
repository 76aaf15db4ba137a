//! Role dashboard contexts

use crate::{
    api::dashboards::{AdminDashboard, DashboardTotals, LibrarianDashboard, MemberDashboard},
    config::DashboardConfig,
    error::AppResult,
    models::user::Role,
    repository::Repository,
};

#[derive(Clone)]
pub struct DashboardsService {
    repository: Repository,
    config: DashboardConfig,
}

impl DashboardsService {
    pub fn new(repository: Repository, config: DashboardConfig) -> Self {
        Self { repository, config }
    }

    /// Aggregate counts for the admin dashboard
    pub async fn admin_context(&self) -> AppResult<AdminDashboard> {
        let totals = DashboardTotals {
            books: self.repository.books.count().await?,
            authors: self.repository.authors.count().await?,
            libraries: self.repository.libraries.count().await?,
            users: self.repository.users.count().await?,
        };

        Ok(AdminDashboard {
            role: Role::Admin,
            message: "Welcome to the Admin Dashboard!".to_string(),
            totals,
        })
    }

    /// Full book and library collections for the librarian dashboard
    pub async fn librarian_context(&self) -> AppResult<LibrarianDashboard> {
        let books = self.repository.books.list_short(None).await?;
        let libraries = self.repository.libraries.list().await?;

        Ok(LibrarianDashboard {
            role: Role::Librarian,
            message: "Welcome to the Librarian Dashboard!".to_string(),
            books,
            libraries,
        })
    }

    /// Bounded book shelf for the member dashboard
    pub async fn member_context(&self) -> AppResult<MemberDashboard> {
        let books = self
            .repository
            .books
            .list_short(Some(self.config.member_shelf_size))
            .await?;

        Ok(MemberDashboard {
            role: Role::Member,
            message: "Welcome to the Member Dashboard!".to_string(),
            books,
        })
    }
}
