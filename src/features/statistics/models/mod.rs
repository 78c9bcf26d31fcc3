mod month_count;

pub use month_count::MonthCount;
