use async_trait::async_trait;
use clinicdesk_core::models::schedule::{DayOfWeek, DoctorSchedule, ScheduleFilter};
use mockall::mock;
use uuid::Uuid;

use crate::models::DbDoctorSchedule;
use crate::store::ScheduleStore;

// Mock store for handler tests
mock! {
    pub ScheduleStore {}

    #[async_trait]
    impl ScheduleStore for ScheduleStore {
        async fn create_schedule(&self, schedule: DoctorSchedule) -> eyre::Result<DbDoctorSchedule>;

        async fn get_schedule(&self, id: Uuid) -> eyre::Result<Option<DbDoctorSchedule>>;

        async fn find_schedule_for_day(
            &self,
            doctor_id: Uuid,
            day_of_week: DayOfWeek,
        ) -> eyre::Result<Option<DbDoctorSchedule>>;

        async fn list_schedules(&self, filter: ScheduleFilter) -> eyre::Result<Vec<DbDoctorSchedule>>;

        async fn update_schedule(
            &self,
            id: Uuid,
            schedule: DoctorSchedule,
        ) -> eyre::Result<Option<DbDoctorSchedule>>;

        async fn delete_schedule(&self, id: Uuid) -> eyre::Result<bool>;
    }
}
