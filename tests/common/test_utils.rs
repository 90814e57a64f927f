use cinema_ticket_service::db::Database;
use sqlx::sqlite::SqlitePool as Pool;
use sqlx::Error;

// Fresh in-memory database per test, with helpers to seed the tables the
// ticket endpoints read from.
pub struct TestDb {
    pub pool: Pool,
}

#[allow(dead_code)]
impl TestDb {
    pub async fn new() -> Result<Self, Error> {
        let db = Database::in_memory().await?;
        Ok(TestDb { pool: db.pool })
    }

    pub async fn insert_member(&self, username: &str) -> Result<i64, Error> {
        let result = sqlx::query(
            r#"INSERT INTO members (username, first_name, last_name, email)
            VALUES (?, 'Test', 'Member', ?)"#,
        )
        .bind(username)
        .bind(format!("{}@example.com", username))
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn insert_payment(&self, total_price: f64) -> Result<i64, Error> {
        let result = sqlx::query(
            r#"INSERT INTO payments (payment_time, total_price, status)
            VALUES ('2024-10-01T10:00:00Z', ?, 'paid')"#,
        )
        .bind(total_price)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn insert_ticket(&self, member_id: i64, payment_id: i64) -> Result<i64, Error> {
        let result = sqlx::query(
            r#"INSERT INTO tickets (created_at, updated_at, point, status, member_id, payment_id)
            VALUES ('2024-10-01T10:00:00Z', '2024-10-01T10:00:00Z', 10, 'paid', ?, ?)"#,
        )
        .bind(member_id)
        .bind(payment_id)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn insert_movie(&self, name: &str) -> Result<i64, Error> {
        let result = sqlx::query("INSERT INTO movies (movie_name, movie_duration) VALUES (?, 120)")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn insert_theater(&self, name: &str) -> Result<i64, Error> {
        let result = sqlx::query("INSERT INTO theaters (theater_name) VALUES (?)")
            .bind(name)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn insert_seat(&self, seat_no: &str, theater_id: i64) -> Result<i64, Error> {
        let result = sqlx::query("INSERT INTO seats (seat_no, theater_id) VALUES (?, ?)")
            .bind(seat_no)
            .bind(theater_id)
            .execute(&self.pool)
            .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn insert_show_time(
        &self,
        show_date: &str,
        movie_id: i64,
        theater_id: i64,
    ) -> Result<i64, Error> {
        let result = sqlx::query(
            "INSERT INTO show_times (show_date, movie_id, theater_id) VALUES (?, ?, ?)",
        )
        .bind(show_date)
        .bind(movie_id)
        .bind(theater_id)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    pub async fn insert_booking(
        &self,
        member_id: i64,
        show_time_id: i64,
        seat_id: i64,
        ticket_id: i64,
    ) -> Result<i64, Error> {
        let result = sqlx::query(
            r#"INSERT INTO bookings (member_id, show_time_id, seat_id, ticket_id)
            VALUES (?, ?, ?, ?)"#,
        )
        .bind(member_id)
        .bind(show_time_id)
        .bind(seat_id)
        .bind(ticket_id)
        .execute(&self.pool)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Member with two tickets: the first holds seats A2 and A1 for an evening
    /// show, the second holds B5 in another theater. Returns the member id.
    pub async fn seed_member_bookings(&self) -> Result<i64, Error> {
        let member_id = self.insert_member("report_member").await?;
        let payment_id = self.insert_payment(360.0).await?;

        let movie_id = self.insert_movie("Interstellar").await?;
        let hall_one = self.insert_theater("Theater 1").await?;
        let hall_two = self.insert_theater("Theater 2").await?;

        let a1 = self.insert_seat("A1", hall_one).await?;
        let a2 = self.insert_seat("A2", hall_one).await?;
        let b5 = self.insert_seat("B5", hall_two).await?;

        let evening = self
            .insert_show_time("2024-10-01 19:00:00", movie_id, hall_one)
            .await?;
        let late = self
            .insert_show_time("2024-10-02 22:00:00", movie_id, hall_two)
            .await?;

        let first_ticket = self.insert_ticket(member_id, payment_id).await?;
        let second_ticket = self.insert_ticket(member_id, payment_id).await?;

        // inserted out of seat order on purpose
        self.insert_booking(member_id, evening, a2, first_ticket).await?;
        self.insert_booking(member_id, evening, a1, first_ticket).await?;
        self.insert_booking(member_id, late, b5, second_ticket).await?;

        Ok(member_id)
    }

    pub async fn ticket_deleted_at(&self, id: i64) -> Result<Option<String>, Error> {
        sqlx::query_scalar("SELECT deleted_at FROM tickets WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await
    }

    // counts soft-deleted rows too
    pub async fn ticket_count(&self) -> Result<i64, Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM tickets")
            .fetch_one(&self.pool)
            .await
    }
}
