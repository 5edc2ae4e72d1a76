//! The persistence seam used by request handlers.
//!
//! [`PgScheduleStore`] forwards to the free functions in
//! [`crate::repositories::doctor_schedule`]; tests substitute
//! [`crate::mock::repositories::MockScheduleStore`].

use async_trait::async_trait;
use clinicdesk_core::models::schedule::{DayOfWeek, DoctorSchedule, ScheduleFilter};
use eyre::Result;
use uuid::Uuid;

use crate::DbPool;
use crate::models::DbDoctorSchedule;
use crate::repositories::doctor_schedule;

#[async_trait]
pub trait ScheduleStore: Send + Sync {
    async fn create_schedule(&self, schedule: DoctorSchedule) -> Result<DbDoctorSchedule>;

    async fn get_schedule(&self, id: Uuid) -> Result<Option<DbDoctorSchedule>>;

    async fn find_schedule_for_day(
        &self,
        doctor_id: Uuid,
        day_of_week: DayOfWeek,
    ) -> Result<Option<DbDoctorSchedule>>;

    async fn list_schedules(&self, filter: ScheduleFilter) -> Result<Vec<DbDoctorSchedule>>;

    async fn update_schedule(
        &self,
        id: Uuid,
        schedule: DoctorSchedule,
    ) -> Result<Option<DbDoctorSchedule>>;

    async fn delete_schedule(&self, id: Uuid) -> Result<bool>;
}

#[derive(Debug, Clone)]
pub struct PgScheduleStore {
    pool: DbPool,
}

impl PgScheduleStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScheduleStore for PgScheduleStore {
    async fn create_schedule(&self, schedule: DoctorSchedule) -> Result<DbDoctorSchedule> {
        doctor_schedule::create_schedule(&self.pool, &schedule).await
    }

    async fn get_schedule(&self, id: Uuid) -> Result<Option<DbDoctorSchedule>> {
        doctor_schedule::get_schedule_by_id(&self.pool, id).await
    }

    async fn find_schedule_for_day(
        &self,
        doctor_id: Uuid,
        day_of_week: DayOfWeek,
    ) -> Result<Option<DbDoctorSchedule>> {
        doctor_schedule::find_schedule_for_day(&self.pool, doctor_id, day_of_week).await
    }

    async fn list_schedules(&self, filter: ScheduleFilter) -> Result<Vec<DbDoctorSchedule>> {
        doctor_schedule::list_schedules(&self.pool, &filter).await
    }

    async fn update_schedule(
        &self,
        id: Uuid,
        schedule: DoctorSchedule,
    ) -> Result<Option<DbDoctorSchedule>> {
        doctor_schedule::update_schedule(&self.pool, id, &schedule).await
    }

    async fn delete_schedule(&self, id: Uuid) -> Result<bool> {
        doctor_schedule::delete_schedule(&self.pool, id).await
    }
}
