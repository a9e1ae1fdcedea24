pub(crate) mod data;

pub(crate) use data::{
    load_school_data, AttendanceRecord, AttendanceStatus, DataError, SchoolData,
};
