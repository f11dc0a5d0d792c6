//! # Studyhall API
//!
//! A learning-platform REST API built with Rust, Axum, and PostgreSQL.
//! It manages users, classes, courses, students, and payment records
//! behind JWT authentication with a hierarchical role system.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── config/           # Environment-driven configuration
//! ├── middleware/       # Auth gates, CORS, rate limiting, timeout
//! ├── modules/          # Feature modules
//! │   ├── auth/        # Sign-in, sign-up, token refresh
//! │   ├── users/       # Profiles, bulk deletion, password reset
//! │   ├── classes/     # Classes and student enrollment
//! │   ├── courses/     # Course material and video uploads
//! │   ├── students/    # Teacher-facing student rosters
//! │   └── transactions/# Payment records
//! └── utils/           # Errors, envelopes, JWT, email, storage
//! ```
//!
//! Each feature module follows a consistent structure: `model.rs` for
//! entities and DTOs, `service.rs` for business logic, `controller.rs`
//! for HTTP handlers, and `router.rs` for route wiring.
//!
//! ## Authentication
//!
//! - **Access token**: short-lived (default 1 hour), bearer-presented.
//! - **Refresh token**: long-lived (default 7 days), exchanged at
//!   `/auth/refresh`.
//! - **Roles**: `student < teacher < admin`; role gates re-read the
//!   user record on every request so revocations apply immediately.
//!
//! Every response shares one envelope: `{status, message, data}` on
//! success, `{status, message, data: null, error?}` on failure.

pub mod config;
pub mod docs;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;
