use crate::models::member::Member;
use crate::models::payment::Payment;
use crate::models::ticket::{BookingReportRow, NewTicket, Ticket, TicketInput};
use crate::utils::error::{AppError, AppResult};
use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use std::collections::{BTreeSet, HashMap};

const TICKET_COLUMNS: &str =
    "id, created_at, updated_at, deleted_at, point, status, member_id, payment_id";

// One row per (ticket, show date, theater); seats of the group joined with ", "
const BOOKING_REPORT_SQL: &str = r#"
    SELECT
        m.movie_name AS movie,
        s.show_date AS date,
        GROUP_CONCAT(se.seat_no, ', ' ORDER BY se.seat_no) AS seats,
        t.theater_name AS theater
    FROM bookings b
    JOIN show_times s ON b.show_time_id = s.id
    JOIN movies m ON s.movie_id = m.id
    JOIN seats se ON b.seat_id = se.id
    JOIN theaters t ON se.theater_id = t.id
    WHERE b.member_id = ?
    GROUP BY b.ticket_id, s.show_date, t.theater_name
    ORDER BY b.ticket_id DESC
"#;

#[derive(Clone)]
pub struct TicketService {
    pool: SqlitePool,
}

impl TicketService {
    pub fn new(pool: SqlitePool) -> Self {
        TicketService { pool }
    }

    /// All tickets with their member and payment attached.
    ///
    /// Any store failure is reported as `NotFound`.
    pub async fn list_tickets(&self) -> AppResult<Vec<Ticket>> {
        self.load_tickets().await.map_err(|e| {
            log::warn!("Listing tickets failed: {}", e);
            AppError::NotFound(e.to_string())
        })
    }

    async fn load_tickets(&self) -> Result<Vec<Ticket>, sqlx::Error> {
        let mut tickets = sqlx::query_as::<_, Ticket>(&format!(
            "SELECT {} FROM tickets WHERE deleted_at IS NULL ORDER BY id",
            TICKET_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        if tickets.is_empty() {
            return Ok(tickets);
        }

        let member_ids: BTreeSet<i64> = tickets.iter().map(|t| t.member_id).collect();
        let payment_ids: BTreeSet<i64> = tickets.iter().map(|t| t.payment_id).collect();

        let members: HashMap<i64, Member> = self
            .fetch_by_ids::<Member>(
                "SELECT id, username, first_name, last_name, email FROM members",
                &member_ids,
            )
            .await?
            .into_iter()
            .map(|m| (m.id, m))
            .collect();

        let payments: HashMap<i64, Payment> = self
            .fetch_by_ids::<Payment>(
                "SELECT id, payment_time, total_price, status FROM payments",
                &payment_ids,
            )
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        for ticket in tickets.iter_mut() {
            ticket.member = members.get(&ticket.member_id).cloned();
            ticket.payment = payments.get(&ticket.payment_id).cloned();
        }

        Ok(tickets)
    }

    // `select` must not carry a WHERE clause; one is appended for the id list
    async fn fetch_by_ids<T>(&self, select: &str, ids: &BTreeSet<i64>) -> Result<Vec<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(select);
        builder.push(" WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(")");

        builder.build_query_as::<T>().fetch_all(&self.pool).await
    }

    /// Booking history of a member, most recent ticket first.
    ///
    /// `member_id` is bound as given; an unknown member yields an empty list.
    pub async fn booking_report(&self, member_id: &str) -> AppResult<Vec<BookingReportRow>> {
        log::info!("Received Member ID: {}", member_id);

        let rows = sqlx::query_as::<_, BookingReportRow>(BOOKING_REPORT_SQL)
            .bind(member_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                log::warn!("Booking report for member {} failed: {}", member_id, e);
                AppError::NotFound("Bookings not found".into())
            })?;

        log::info!("Fetched bookings: {:?}", rows);
        Ok(rows)
    }

    pub async fn create_ticket(&self, input: TicketInput) -> AppResult<Ticket> {
        let new_ticket = NewTicket::from(input);
        let now = Utc::now();

        let ticket = sqlx::query_as::<_, Ticket>(&format!(
            r#"
            INSERT INTO tickets (created_at, updated_at, point, status, member_id, payment_id)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING {}
            "#,
            TICKET_COLUMNS
        ))
        .bind(now)
        .bind(now)
        .bind(new_ticket.point)
        .bind(&new_ticket.status)
        .bind(new_ticket.member_id)
        .bind(new_ticket.payment_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            log::warn!("Creating ticket failed: {}", e);
            AppError::Internal(e.to_string())
        })?;

        log::info!("Created ticket {}", ticket.id);
        Ok(ticket)
    }

    /// Live ticket by id. `id` is bound as given, so a non-numeric id simply
    /// matches nothing.
    pub async fn find_ticket(&self, id: &str) -> AppResult<Ticket> {
        sqlx::query_as::<_, Ticket>(&format!(
            "SELECT {} FROM tickets WHERE id = ? AND deleted_at IS NULL",
            TICKET_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            log::warn!("Looking up ticket {} failed: {}", id, e);
            AppError::NotFound("Ticket not found".into())
        })?
        .ok_or_else(|| AppError::NotFound("Ticket not found".into()))
    }

    /// Loads the stored ticket, overlays the fields present in `input`, then
    /// writes the whole record back.
    pub async fn update_ticket(&self, id: &str, input: TicketInput) -> AppResult<Ticket> {
        let mut ticket = self.find_ticket(id).await?;
        ticket.merge(input);
        ticket.updated_at = Utc::now();
        self.save_ticket(&ticket).await?;

        log::info!("Updated ticket {}", ticket.id);
        Ok(ticket)
    }

    async fn save_ticket(&self, ticket: &Ticket) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE tickets
            SET updated_at = ?, point = ?, status = ?, member_id = ?, payment_id = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(ticket.updated_at)
        .bind(ticket.point)
        .bind(&ticket.status)
        .bind(ticket.member_id)
        .bind(ticket.payment_id)
        .bind(ticket.id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            log::warn!("Saving ticket {} failed: {}", ticket.id, e);
            AppError::Internal(e.to_string())
        })?;

        // deleted between the lookup and the write
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Ticket not found".into()));
        }

        Ok(())
    }

    /// Soft-deletes the ticket by stamping `deleted_at`, so bookings that still
    /// point at it stay valid. A missing or already deleted id is not an error.
    /// Returns the number of rows marked.
    pub async fn delete_ticket(&self, id: &str) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE tickets SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            log::warn!("Deleting ticket {} failed: {}", id, e);
            AppError::BadRequest(e.to_string())
        })?;

        log::info!("Deleted ticket {} ({} rows)", id, result.rows_affected());
        Ok(result.rows_affected())
    }
}
