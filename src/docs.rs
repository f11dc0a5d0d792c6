use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::model::{RefreshRequest, SignInRequest, SignInResponse, SignUpRequest};
use crate::modules::classes::model::{
    AssignStudentsRequest, Class, ClassDetail, CreateClassRequest, UpdateClassRequest,
};
use crate::modules::courses::model::{Course, CreateCourseRequest, UpdateCourseRequest};
use crate::modules::transactions::model::{
    CreateTransactionRequest, Transaction, TransactionStatus,
};
use crate::modules::users::model::{
    DeleteUsersRequest, RequestPasswordResetRequest, ResetPasswordRequest, UpdateProfileRequest,
    User, UserRole,
};
use crate::utils::response::{ErrorBody, ErrorResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::health::health_check,
        crate::modules::auth::controller::sign_in,
        crate::modules::auth::controller::sign_up,
        crate::modules::auth::controller::refresh_token,
        crate::modules::users::controller::get_users,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::update_profile,
        crate::modules::users::controller::delete_users,
        crate::modules::users::controller::request_password_reset,
        crate::modules::users::controller::reset_password,
        crate::modules::classes::controller::get_classes,
        crate::modules::classes::controller::get_class,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::update_class,
        crate::modules::classes::controller::delete_class,
        crate::modules::classes::controller::assign_students,
        crate::modules::classes::controller::unassign_students,
        crate::modules::courses::controller::get_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::upload_course_video,
        crate::modules::students::controller::get_students,
        crate::modules::students::controller::get_student,
        crate::modules::transactions::controller::get_transactions,
        crate::modules::transactions::controller::get_transaction,
        crate::modules::transactions::controller::create_transaction,
    ),
    components(
        schemas(
            User,
            UserRole,
            UpdateProfileRequest,
            DeleteUsersRequest,
            RequestPasswordResetRequest,
            ResetPasswordRequest,
            SignInRequest,
            SignUpRequest,
            RefreshRequest,
            SignInResponse,
            Class,
            ClassDetail,
            CreateClassRequest,
            UpdateClassRequest,
            AssignStudentsRequest,
            Course,
            CreateCourseRequest,
            UpdateCourseRequest,
            Transaction,
            TransactionStatus,
            CreateTransactionRequest,
            ErrorResponse,
            ErrorBody,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health endpoints"),
        (name = "Authentication", description = "Sign-in, sign-up, and token refresh"),
        (name = "Users", description = "User and profile management"),
        (name = "Classes", description = "Class management and enrollment"),
        (name = "Courses", description = "Course material management"),
        (name = "Students", description = "Student rosters"),
        (name = "Transactions", description = "Payment records")
    ),
    info(
        title = "Studyhall API",
        version = "0.1.0",
        description = "A learning-platform REST API built with Rust, Axum, and PostgreSQL featuring JWT-based authentication and hierarchical roles.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
            components.add_security_scheme(
                "basic",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
        }
    }
}
