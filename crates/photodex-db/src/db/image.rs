use photodex_core::{
    models::{Image, ImageFields},
    AppError,
};
use sqlx::{Sqlite, SqlitePool};

const IMAGE_COLUMNS: &str = "id, file_name, date_time, year, month, day, dir_location, width, \
     height, lat, lon, size, image_type, megapixels, file_size";

/// Repository for catalogued images
#[derive(Clone)]
pub struct ImageRepository {
    pool: SqlitePool,
}

/// Unique violations on `file_name` become `Conflict`; everything else stays a database error.
fn map_write_error(err: sqlx::Error, file_name: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::Conflict(
            format!("An image named '{}' is already catalogued", file_name),
        ),
        _ => AppError::from(err),
    }
}

impl ImageRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All images, oldest first
    #[tracing::instrument(skip(self), fields(db.table = "images", db.operation = "select"))]
    pub async fn list_images(&self) -> Result<Vec<Image>, AppError> {
        let images = sqlx::query_as::<Sqlite, Image>(&format!(
            "SELECT {} FROM images ORDER BY id ASC",
            IMAGE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(images)
    }

    #[tracing::instrument(skip(self), fields(db.table = "images", db.operation = "select", db.record_id = id))]
    pub async fn get_image(&self, id: i64) -> Result<Option<Image>, AppError> {
        let image = sqlx::query_as::<Sqlite, Image>(&format!(
            "SELECT {} FROM images WHERE id = ?",
            IMAGE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(image)
    }

    /// Insert a new image and return it with its assigned id
    #[tracing::instrument(skip(self, record), fields(db.table = "images", db.operation = "insert", file_name = %record.file_name))]
    pub async fn create_image(&self, record: &ImageFields) -> Result<Image, AppError> {
        let image = sqlx::query_as::<Sqlite, Image>(&format!(
            r#"
            INSERT INTO images (file_name, date_time, year, month, day, dir_location, width,
                                height, lat, lon, size, image_type, megapixels, file_size)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            IMAGE_COLUMNS
        ))
        .bind(&record.file_name)
        .bind(&record.date_time)
        .bind(record.year)
        .bind(record.month)
        .bind(record.day)
        .bind(&record.dir_location)
        .bind(record.width)
        .bind(record.height)
        .bind(&record.lat)
        .bind(&record.lon)
        .bind(&record.size)
        .bind(&record.image_type)
        .bind(record.megapixels)
        .bind(&record.file_size)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &record.file_name))?;

        tracing::info!(image_id = image.id, "Image catalogued");
        Ok(image)
    }

    /// Replace every mutable column of an image. `None` when the id is unknown.
    #[tracing::instrument(skip(self, record), fields(db.table = "images", db.operation = "update", db.record_id = id))]
    pub async fn update_image(
        &self,
        id: i64,
        record: &ImageFields,
    ) -> Result<Option<Image>, AppError> {
        let image = sqlx::query_as::<Sqlite, Image>(&format!(
            r#"
            UPDATE images
            SET file_name = ?, date_time = ?, year = ?, month = ?, day = ?, dir_location = ?,
                width = ?, height = ?, lat = ?, lon = ?, size = ?, image_type = ?,
                megapixels = ?, file_size = ?
            WHERE id = ?
            RETURNING {}
            "#,
            IMAGE_COLUMNS
        ))
        .bind(&record.file_name)
        .bind(&record.date_time)
        .bind(record.year)
        .bind(record.month)
        .bind(record.day)
        .bind(&record.dir_location)
        .bind(record.width)
        .bind(record.height)
        .bind(&record.lat)
        .bind(&record.lon)
        .bind(&record.size)
        .bind(&record.image_type)
        .bind(record.megapixels)
        .bind(&record.file_size)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &record.file_name))?;

        Ok(image)
    }

    /// Returns false when nothing was deleted
    #[tracing::instrument(skip(self), fields(db.table = "images", db.operation = "delete", db.record_id = id))]
    pub async fn delete_image(&self, id: i64) -> Result<bool, AppError> {
        let rows_affected = sqlx::query("DELETE FROM images WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    /// Cheap round trip used by the readiness probe
    pub async fn ping(&self) -> Result<(), AppError> {
        sqlx::query_scalar::<Sqlite, i64>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MIGRATOR;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn repo() -> ImageRepository {
        // one connection that never recycles, or the in-memory database vanishes
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        MIGRATOR.run(&pool).await.unwrap();
        ImageRepository::new(pool)
    }

    fn fields(name: &str) -> ImageFields {
        ImageFields {
            file_name: name.to_string(),
            date_time: "2023:04:05 10:00:00".to_string(),
            year: 2023,
            month: 4,
            day: 5,
            dir_location: format!("/photos/{}", name),
            width: 640,
            height: 480,
            lat: "38.7223".to_string(),
            lon: "-9.1393".to_string(),
            size: "640x480".to_string(),
            image_type: "JPEG".to_string(),
            megapixels: Some(0.307),
            file_size: Some("12 kB".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = repo().await;
        let a = repo.create_image(&fields("a.jpg")).await.unwrap();
        let b = repo.create_image(&fields("b.jpg")).await.unwrap();

        assert!(b.id > a.id);
        assert_eq!(a.fields(), fields("a.jpg"));
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let repo = repo().await;
        assert!(repo.list_images().await.unwrap().is_empty());

        for name in ["c.jpg", "a.jpg", "b.jpg"] {
            repo.create_image(&fields(name)).await.unwrap();
        }

        let names: Vec<String> = repo
            .list_images()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.file_name)
            .collect();
        assert_eq!(names, vec!["c.jpg", "a.jpg", "b.jpg"]);
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let repo = repo().await;
        assert!(repo.get_image(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_file_name_is_conflict() {
        let repo = repo().await;
        repo.create_image(&fields("a.jpg")).await.unwrap();

        let err = repo.create_image(&fields("a.jpg")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(repo.list_images().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_replaces_all_fields() {
        let repo = repo().await;
        let created = repo.create_image(&fields("a.jpg")).await.unwrap();

        let replacement = ImageFields {
            file_name: "renamed.jpg".to_string(),
            ..ImageFields::default()
        };
        let updated = repo
            .update_image(created.id, &replacement)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.fields(), replacement);
        assert_eq!(repo.get_image(created.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_update_missing_is_none() {
        let repo = repo().await;
        assert!(repo.update_image(7, &fields("a.jpg")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_into_taken_name_is_conflict() {
        let repo = repo().await;
        repo.create_image(&fields("a.jpg")).await.unwrap();
        let b = repo.create_image(&fields("b.jpg")).await.unwrap();

        let err = repo.update_image(b.id, &fields("a.jpg")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo().await;
        let created = repo.create_image(&fields("a.jpg")).await.unwrap();

        assert!(repo.delete_image(created.id).await.unwrap());
        assert!(!repo.delete_image(created.id).await.unwrap());
        assert!(repo.get_image(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let repo = repo().await;
        let a = repo.create_image(&fields("a.jpg")).await.unwrap();
        repo.delete_image(a.id).await.unwrap();

        let b = repo.create_image(&fields("a.jpg")).await.unwrap();
        assert!(b.id > a.id);
    }
}
