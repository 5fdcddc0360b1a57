//! Data Models Module
//!
//! Request and response DTOs for the log service API.

mod requests;
mod responses;

pub use requests::{validate_file_name, SeriesRequest};
pub use responses::{
    FieldsResponse, FileOption, FilesResponse, HealthResponse, SeriesResponse, StatsResponse,
};
