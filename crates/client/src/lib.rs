// ABOUTME: Async client for LinkedIn's public guest job and company pages.
// ABOUTME: Builds search URLs, fetches pages, and returns records parsed by linkedin-extract.

pub mod client;
pub mod error;
pub mod options;
pub mod reference;
pub mod resource;
pub mod result;
pub mod search;

pub use crate::client::{Client, EntryLevelSearch, RemoteSearch};
pub use crate::error::{ClientError, ErrorCode};
pub use crate::options::{ClientBuilder, Options};
pub use crate::reference::{find_location, Location, INDUSTRIES, JOB_FUNCTIONS, POPULAR_LOCATIONS};
pub use crate::resource::decode_body;
pub use crate::result::JobSearchResult;
pub use crate::search::{build_job_search_url, build_public_search_url, DatePosted, JobSearchParams, SortBy};

pub use linkedin_extract as extract;
