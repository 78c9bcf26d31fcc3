use sqlx::{PgPool, Postgres, QueryBuilder};
use std::collections::HashSet;
use std::sync::Arc;

use crate::core::database::handle_db_error;
use crate::core::error::{AppError, Result};
use crate::features::artists::ArtistService;
use crate::features::supervisions::dtos::{
    ColumnValue, NewSupervision, SupervisionPatch, SupervisionResponseDto, TakeInKsDto,
    TakeInKsResponseDto,
};
use crate::features::supervisions::filter::SupervisionFilter;
use crate::features::supervisions::models::Supervision;
use crate::shared::constants::{
    STATUS_EXECUTION_NEW, STATUS_KS_NOT_TAKEN_IN, STATUS_KS_TAKEN_IN,
};

fn not_found(id: i32) -> AppError {
    AppError::Validation(format!("Supervision with id {} not found", id))
}

/// Service for supervision records
pub struct SupervisionService {
    pool: PgPool,
    artists: Arc<ArtistService>,
}

impl SupervisionService {
    pub fn new(pool: PgPool, artists: Arc<ArtistService>) -> Self {
        Self { pool, artists }
    }

    /// List non-archived supervisions matching the filter
    pub async fn list(&self, filter: &SupervisionFilter) -> Result<Vec<SupervisionResponseDto>> {
        let mut qb = QueryBuilder::<Postgres>::new(Supervision::SELECT);
        filter.apply(&mut qb);

        let supervisions = qb
            .build_query_as::<Supervision>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to list supervisions: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(supervisions.into_iter().map(Into::into).collect())
    }

    /// Get a supervision by id, archived ones included
    pub async fn get_by_id(&self, id: i32) -> Result<SupervisionResponseDto> {
        let query = format!("{} WHERE s.id = $1", Supervision::SELECT);

        let supervision = sqlx::query_as::<_, Supervision>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| not_found(id))?;

        Ok(supervision.into())
    }

    /// Supervisions with the given ids in id order, archived ones included
    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Supervision>> {
        let query = format!("{} WHERE s.id = ANY($1) ORDER BY s.id", Supervision::SELECT);

        sqlx::query_as::<_, Supervision>(&query)
            .bind(ids)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to load supervisions {:?}: {:?}", ids, e);
                AppError::Database(e)
            })
    }

    /// Create a supervision, registering the inspector when the name is new
    pub async fn create(&self, new: NewSupervision) -> Result<SupervisionResponseDto> {
        let mut tx = self.pool.begin().await?;

        let artist_id = match new.artist.as_deref() {
            Some(fio) => Some(self.artists.resolve_or_create(&mut *tx, fio).await?),
            None => None,
        };

        let id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO supervisions (
                datetime_start, datetime_end, day_type_id, station,
                department_responsible_id, department_distance, artist_id, type_work,
                contractor_id, manufacturer_info, order_number, note,
                status_ks_id, comment, paid_status_id, amount, status_execution_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING id
            "#,
        )
        .bind(new.datetime_start)
        .bind(new.datetime_end)
        .bind(new.day_type_id)
        .bind(&new.station)
        .bind(new.department_responsible_id)
        .bind(&new.department_distance)
        .bind(artist_id)
        .bind(&new.type_work)
        .bind(new.contractor_id)
        .bind(&new.manufacturer_info)
        .bind(&new.order_number)
        .bind(&new.note)
        .bind(new.status_ks_id.unwrap_or(STATUS_KS_NOT_TAKEN_IN))
        .bind(&new.comment)
        .bind(new.paid_status_id)
        .bind(new.amount)
        .bind(new.status_execution_id.unwrap_or(STATUS_EXECUTION_NEW))
        .fetch_one(&mut *tx)
        .await
        .map_err(handle_db_error)?;

        tx.commit().await?;

        tracing::info!("Created supervision {}", id);
        self.get_by_id(id).await
    }

    /// Apply a partial update; the inspector reference is always replaced
    pub async fn update(&self, id: i32, patch: SupervisionPatch) -> Result<SupervisionResponseDto> {
        let mut tx = self.pool.begin().await?;

        let artist_id = match patch.artist.as_deref() {
            Some(fio) => Some(self.artists.resolve_or_create(&mut *tx, fio).await?),
            None => None,
        };

        let mut qb = QueryBuilder::<Postgres>::new("UPDATE supervisions SET ");
        {
            let mut assignments = qb.separated(", ");
            for (column, value) in patch.assignments {
                assignments.push(column);
                assignments.push_unseparated(" = ");
                match value {
                    ColumnValue::Text(v) => assignments.push_bind_unseparated(v),
                    ColumnValue::Int(v) => assignments.push_bind_unseparated(v),
                    ColumnValue::DateTime(v) => assignments.push_bind_unseparated(v),
                };
            }
            assignments.push("artist_id = ");
            assignments.push_bind_unseparated(artist_id);
        }
        qb.push(" WHERE id = ");
        qb.push_bind(id);

        let result = qb
            .build()
            .execute(&mut *tx)
            .await
            .map_err(handle_db_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tx.commit().await?;

        tracing::info!("Updated supervision {}", id);
        self.get_by_id(id).await
    }

    /// Mark a supervision archived; repeating the call is harmless
    pub async fn archive(&self, id: i32) -> Result<()> {
        let result = sqlx::query("UPDATE supervisions SET is_archived = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(handle_db_error)?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        tracing::info!("Archived supervision {}", id);
        Ok(())
    }

    /// Accept and reject supervisions for settlement in one transaction.
    ///
    /// The rejection runs last, so an id present in both lists ends up rejected.
    pub async fn take_in_ks(&self, dto: TakeInKsDto) -> Result<TakeInKsResponseDto> {
        let take_in = dto.take_in_ks_ids.unwrap_or_default();
        let not_take_in = dto.not_take_in_ks_ids.unwrap_or_default();

        let accepted: HashSet<i32> = take_in.iter().copied().collect();
        let overlap: Vec<i32> = not_take_in
            .iter()
            .copied()
            .filter(|id| accepted.contains(id))
            .collect();
        if !overlap.is_empty() {
            tracing::warn!(
                "Supervisions {:?} are in both settlement lists, they will be rejected",
                overlap
            );
        }

        let mut tx = self.pool.begin().await?;

        let mut taken_in = 0;
        if !take_in.is_empty() {
            taken_in = sqlx::query("UPDATE supervisions SET status_ks_id = $1 WHERE id = ANY($2)")
                .bind(STATUS_KS_TAKEN_IN)
                .bind(&take_in)
                .execute(&mut *tx)
                .await
                .map_err(handle_db_error)?
                .rows_affected();
        }

        let mut not_taken_in = 0;
        if !not_take_in.is_empty() {
            not_taken_in = sqlx::query(
                "UPDATE supervisions SET status_ks_id = $1, comment = NULL WHERE id = ANY($2)",
            )
            .bind(STATUS_KS_NOT_TAKEN_IN)
            .bind(&not_take_in)
            .execute(&mut *tx)
            .await
            .map_err(handle_db_error)?
            .rows_affected();
        }

        tx.commit().await?;

        tracing::info!(
            "Settlement flip: {} taken in, {} not taken in",
            taken_in,
            not_taken_in
        );

        Ok(TakeInKsResponseDto {
            taken_in,
            not_taken_in,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::supervisions::dtos::{
        SortDirection, SortKey, SupervisionQueryParams, UpdateSupervisionDto,
    };
    use crate::shared::datetime::parse_datetime;
    use fake::faker::lorem::en::Sentence;
    use fake::faker::name::raw::Name;
    use fake::locales::EN;
    use fake::Fake;

    async fn seed_lookups(pool: &PgPool) {
        sqlx::query("INSERT INTO day_types (id, name) VALUES (1, 'Рабочий')")
            .execute(pool)
            .await
            .unwrap();
    }

    fn new_supervision(start: &str, end: &str, artist: Option<String>) -> NewSupervision {
        NewSupervision {
            datetime_start: parse_datetime("datetime_start", start).unwrap(),
            datetime_end: parse_datetime("datetime_end", end).unwrap(),
            day_type_id: 1,
            station: Some("Москва-Пассажирская".to_string()),
            department_responsible_id: 1,
            department_distance: None,
            artist,
            type_work: Some(Sentence(3..6).fake()),
            contractor_id: None,
            manufacturer_info: None,
            order_number: None,
            note: None,
            status_ks_id: None,
            comment: Some("checked".to_string()),
            paid_status_id: None,
            amount: None,
            status_execution_id: None,
        }
    }

    fn service(pool: &PgPool) -> SupervisionService {
        SupervisionService::new(pool.clone(), Arc::new(ArtistService::new(pool.clone())))
    }

    fn month_filter(year: i32, month: u32) -> SupervisionFilter {
        SupervisionFilter::try_from(&SupervisionQueryParams {
            year: Some(year),
            month: Some(month),
            ..Default::default()
        })
        .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
    async fn test_create_reuses_known_artist(pool: PgPool) {
        seed_lookups(&pool).await;
        let service = service(&pool);
        let fio: String = Name(EN).fake();

        let first = service
            .create(new_supervision("2024-01-01 08:00", "2024-01-01 17:00", Some(fio.clone())))
            .await
            .unwrap();
        let second = service
            .create(new_supervision("2024-01-02 08:00", "2024-01-02 17:00", Some(fio.clone())))
            .await
            .unwrap();

        assert_eq!(first.artist_id, second.artist_id);
        assert_eq!(first.artist.as_deref(), Some(fio.as_str()));
        assert_eq!(first.status_ks_id, STATUS_KS_NOT_TAKEN_IN);
        assert_eq!(first.status_execution_id, STATUS_EXECUTION_NEW);
        assert_eq!(first.datetime_start, "2024-01-01 08:00");

        let artists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM artists")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(artists, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
    async fn test_create_with_unknown_reference_is_rejected(pool: PgPool) {
        seed_lookups(&pool).await;
        let mut new = new_supervision("2024-01-01 08:00", "2024-01-01 17:00", None);
        new.contractor_id = Some(999);

        let err = service(&pool).create(new).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidReference(_)));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
    async fn test_archived_hidden_from_list_but_fetchable(pool: PgPool) {
        seed_lookups(&pool).await;
        let service = service(&pool);

        let kept = service
            .create(new_supervision("2024-03-05 09:00", "2024-03-05 12:00", None))
            .await
            .unwrap();
        let archived = service
            .create(new_supervision("2024-03-06 09:00", "2024-03-06 12:00", None))
            .await
            .unwrap();

        service.archive(archived.id).await.unwrap();
        service.archive(archived.id).await.unwrap();

        let listed = service.list(&month_filter(2024, 3)).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, kept.id);

        let fetched = service.get_by_id(archived.id).await.unwrap();
        assert!(fetched.is_archived);

        assert!(service.list(&month_filter(2024, 4)).await.unwrap().is_empty());
        assert!(matches!(
            service.archive(archived.id + 100).await,
            Err(AppError::Validation(_))
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
    async fn test_update_is_partial_and_clears_artist(pool: PgPool) {
        seed_lookups(&pool).await;
        let service = service(&pool);
        let created = service
            .create(new_supervision(
                "2024-05-01 08:00",
                "2024-05-01 10:00",
                Some(Name(EN).fake()),
            ))
            .await
            .unwrap();

        let dto: UpdateSupervisionDto =
            serde_json::from_str(r#"{"note": "после проверки", "comment": null}"#).unwrap();
        let updated = service
            .update(created.id, SupervisionPatch::try_from(dto).unwrap())
            .await
            .unwrap();

        assert_eq!(updated.note.as_deref(), Some("после проверки"));
        assert_eq!(updated.comment, None);
        assert_eq!(updated.station, created.station);
        assert_eq!(updated.artist_id, None);

        let missing = service
            .update(created.id + 100, SupervisionPatch::try_from(UpdateSupervisionDto::default()).unwrap())
            .await;
        assert!(matches!(missing, Err(AppError::Validation(_))));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
    async fn test_take_in_ks_rejection_wins_on_overlap(pool: PgPool) {
        seed_lookups(&pool).await;
        let service = service(&pool);
        let a = service
            .create(new_supervision("2024-06-01 08:00", "2024-06-01 10:00", None))
            .await
            .unwrap();
        let b = service
            .create(new_supervision("2024-06-02 08:00", "2024-06-02 10:00", None))
            .await
            .unwrap();

        let counts = service
            .take_in_ks(TakeInKsDto {
                take_in_ks_ids: Some(vec![a.id, b.id]),
                not_take_in_ks_ids: Some(vec![b.id]),
            })
            .await
            .unwrap();
        assert_eq!(counts.taken_in, 2);
        assert_eq!(counts.not_taken_in, 1);

        let a = service.get_by_id(a.id).await.unwrap();
        let b = service.get_by_id(b.id).await.unwrap();
        assert_eq!(a.status_ks_id, STATUS_KS_TAKEN_IN);
        assert_eq!(a.comment.as_deref(), Some("checked"));
        assert_eq!(b.status_ks_id, STATUS_KS_NOT_TAKEN_IN);
        assert_eq!(b.comment, None);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
    async fn test_overlong_text_is_rejected_as_client_error(pool: PgPool) {
        seed_lookups(&pool).await;
        let service = service(&pool);
        let long = "x".repeat(300);

        let mut new = new_supervision("2024-01-01 08:00", "2024-01-01 17:00", None);
        new.department_distance = Some(long.clone());
        let err = service.create(new).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let new = new_supervision("2024-01-01 08:00", "2024-01-01 17:00", Some(long));
        let err = service.create(new).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM supervisions")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 0);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
    async fn test_date_range_listing_includes_last_minute_of_end_day(pool: PgPool) {
        seed_lookups(&pool).await;
        let service = service(&pool);

        let mut ids = Vec::new();
        for (start, station) in [
            ("2024-01-31 23:59", "Бологое"),
            ("2024-01-10 08:00", "Тверь"),
            ("2024-01-01 00:00", "Клин"),
            ("2024-02-01 00:00", "Вышний Волочёк"),
            ("2023-12-31 23:59", "Химки"),
        ] {
            let mut new = new_supervision(start, start, None);
            new.station = Some(station.to_string());
            ids.push(service.create(new).await.unwrap().id);
        }

        let range = |query: SupervisionQueryParams| {
            SupervisionFilter::try_from(&SupervisionQueryParams {
                date_start: Some("2024-01-01".to_string()),
                date_end: Some("2024-01-31".to_string()),
                ..query
            })
            .unwrap()
        };

        let listed = service.list(&range(Default::default())).await.unwrap();
        let listed: Vec<i32> = listed.iter().map(|s| s.id).collect();
        assert_eq!(listed, vec![ids[0], ids[1], ids[2]]);

        let by_start = service
            .list(&range(SupervisionQueryParams {
                sort_key: Some(SortKey::DatetimeStart),
                sort_by: Some(SortDirection::Desc),
                ..Default::default()
            }))
            .await
            .unwrap();
        let starts: Vec<&str> = by_start.iter().map(|s| s.datetime_start.as_str()).collect();
        assert_eq!(
            starts,
            vec!["2024-01-31 23:59", "2024-01-10 08:00", "2024-01-01 00:00"]
        );

        let by_station = service
            .list(&range(SupervisionQueryParams {
                sort_key: Some(SortKey::Station),
                ..Default::default()
            }))
            .await
            .unwrap();
        let stations: Vec<&str> = by_station
            .iter()
            .filter_map(|s| s.station.as_deref())
            .collect();
        assert_eq!(stations, vec!["Бологое", "Клин", "Тверь"]);
    }
}
