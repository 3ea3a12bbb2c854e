use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, Set,
};

use crate::entities::{activity_logs, prelude::*, users};
use crate::models::activity::{ActivityEntry, ActivityPage, NewActivity};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Which rows a reader may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityScope {
    All,
    User(i32),
}

impl ActivityScope {
    fn apply(self, query: Select<ActivityLogs>) -> Select<ActivityLogs> {
        match self {
            Self::All => query,
            Self::User(user_id) => query.filter(activity_logs::Column::UserId.eq(user_id)),
        }
    }
}

fn to_entry(model: activity_logs::Model, user: Option<users::Model>) -> ActivityEntry {
    ActivityEntry {
        id: model.id,
        user_id: model.user_id,
        username: user.map(|u| u.username).unwrap_or_default(),
        timestamp: model.timestamp,
        base_name: model.base_name,
        base_ip: model.base_ip,
        comment: model.comment,
        start_number: model.start_number,
        end_number: model.end_number,
        password_length: model.password_length,
        character_types: model.character_types,
        users_generated: model.users_generated,
    }
}

pub struct ActivityRepository {
    conn: DatabaseConnection,
}

impl ActivityRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn newest_first(scope: ActivityScope) -> Select<ActivityLogs> {
        scope.apply(
            ActivityLogs::find()
                .order_by_desc(activity_logs::Column::Timestamp)
                .order_by_desc(activity_logs::Column::Id),
        )
    }

    pub async fn record(&self, activity: NewActivity) -> Result<ActivityEntry> {
        let timestamp = chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string();

        let active = activity_logs::ActiveModel {
            user_id: Set(activity.user_id),
            timestamp: Set(timestamp),
            base_name: Set(activity.base_name),
            base_ip: Set(activity.base_ip),
            comment: Set(activity.comment),
            start_number: Set(activity.start_number),
            end_number: Set(activity.end_number),
            password_length: Set(activity.password_length),
            character_types: Set(activity.character_types),
            users_generated: Set(activity.users_generated),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert activity record")?;

        let owner = Users::find_by_id(model.user_id)
            .one(&self.conn)
            .await
            .context("Failed to load activity owner")?;

        Ok(to_entry(model, owner))
    }

    /// `page` is 1-based; pages past the end come back empty.
    pub async fn page(&self, scope: ActivityScope, page: u64, per_page: u64) -> Result<ActivityPage> {
        let page = page.max(1);
        let per_page = per_page.max(1);

        let paginator = Self::newest_first(scope)
            .find_also_related(Users)
            .paginate(&self.conn, per_page);

        let totals = paginator
            .num_items_and_pages()
            .await
            .context("Failed to count activity records")?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .context("Failed to fetch activity page")?;

        Ok(ActivityPage {
            items: rows.into_iter().map(|(m, u)| to_entry(m, u)).collect(),
            page,
            per_page,
            total_items: totals.number_of_items,
            total_pages: totals.number_of_pages,
        })
    }

    pub async fn all(&self, scope: ActivityScope) -> Result<Vec<ActivityEntry>> {
        let rows = Self::newest_first(scope)
            .find_also_related(Users)
            .all(&self.conn)
            .await
            .context("Failed to list activity records")?;

        Ok(rows.into_iter().map(|(m, u)| to_entry(m, u)).collect())
    }

    pub async fn recent(&self, limit: u64) -> Result<Vec<ActivityEntry>> {
        let rows = Self::newest_first(ActivityScope::All)
            .limit(limit)
            .find_also_related(Users)
            .all(&self.conn)
            .await
            .context("Failed to list recent activity")?;

        Ok(rows.into_iter().map(|(m, u)| to_entry(m, u)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_format() {
        let at = chrono::NaiveDate::from_ymd_opt(2026, 3, 4)
            .unwrap()
            .and_hms_opt(5, 6, 7)
            .unwrap();
        assert_eq!(at.format(TIMESTAMP_FORMAT).to_string(), "2026-03-04 05:06:07");
    }
}
