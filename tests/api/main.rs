mod health;
mod helpers;
mod work_hours;
