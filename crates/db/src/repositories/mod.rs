pub mod doctor_schedule;
