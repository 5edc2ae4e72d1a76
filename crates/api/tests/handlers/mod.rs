mod middleware_test;
mod preset_test;
mod schedule_test;
