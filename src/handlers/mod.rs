pub mod admin;
pub mod applications;
pub mod auth;
pub mod contracts;
pub mod invoices;
pub mod jobs;
pub mod milestones;
pub mod profiles;
pub mod timesheets;
pub mod users;

use actix_web::web;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    // ── Auth routes (protected by JWT via the AuthenticatedUser extractor) ──
    cfg.service(
        web::scope("/auth")
            .route("/me", web::get().to(auth::me))
            .route("/complete-profile", web::post().to(auth::complete_profile)),
    );

    // ── User routes (all protected — require valid JWT) ──
    cfg.service(web::resource("/users").route(web::get().to(users::get_users)));
    cfg.service(
        web::resource("/users/{id}")
            .route(web::get().to(users::get_user))
            .route(web::put().to(users::update_user))
            .route(web::delete().to(users::delete_user)),
    );

    // ── Profile routes ──
    cfg.service(
        web::scope("/profiles")
            .route("/me", web::get().to(profiles::get_my_profile))
            .route("/me", web::put().to(profiles::upsert_my_profile))
            .route("/me/coaching", web::get().to(profiles::profile_coaching))
            .route("/engineers", web::get().to(profiles::list_engineers))
            .route("/roster", web::get().to(profiles::list_roster))
            .route("/roster", web::post().to(profiles::create_roster_profile))
            .route("/user/{user_id}", web::get().to(profiles::get_profile_by_user)),
    );

    // ── Job routes (search, posting, applications, AI matching) ──
    cfg.service(
        web::scope("/jobs")
            .route("", web::get().to(jobs::get_jobs))
            .route("", web::post().to(jobs::create_job))
            .route("/{id}", web::get().to(jobs::get_job))
            .route("/{id}", web::put().to(jobs::update_job))
            .route("/{id}", web::delete().to(jobs::delete_job))
            .route("/{id}/close", web::post().to(jobs::close_job))
            .route("/{id}/apply", web::post().to(applications::apply))
            .route(
                "/{id}/applications",
                web::get().to(applications::applications_for_job),
            )
            .route("/{id}/match", web::post().to(jobs::match_engineers))
            .route(
                "/company/{company_id}",
                web::get().to(jobs::get_jobs_by_company),
            ),
    );

    // ── Application pipeline routes ──
    cfg.service(
        web::scope("/applications")
            .route("/mine", web::get().to(applications::my_applications))
            .route("/{id}/offer", web::post().to(applications::offer))
            .route("/{id}/reject", web::post().to(applications::reject))
            .route("/{id}/accept", web::post().to(applications::accept))
            .route("/{id}/withdraw", web::post().to(applications::withdraw))
            .route("/{id}/review", web::post().to(applications::review))
            .route(
                "/{id}/supercharge",
                web::post().to(applications::supercharge),
            ),
    );

    // ── Contract lifecycle routes ──
    cfg.service(
        web::scope("/contracts")
            .route("", web::get().to(contracts::get_contracts))
            .route("", web::post().to(contracts::create_contract))
            .route("/{id}", web::get().to(contracts::get_contract))
            .route("/{id}/sign", web::post().to(contracts::sign_contract))
            .route("/{id}/cancel", web::post().to(contracts::cancel_contract))
            .route("/{id}/complete", web::post().to(contracts::complete_contract))
            .route("/{id}/milestones", web::get().to(milestones::get_milestones))
            .route(
                "/{id}/milestones/{mid}/fund",
                web::post().to(milestones::fund_milestone),
            )
            .route(
                "/{id}/milestones/{mid}/submit",
                web::post().to(milestones::submit_milestone),
            )
            .route(
                "/{id}/milestones/{mid}/approve",
                web::post().to(milestones::approve_milestone),
            )
            .route("/{id}/timesheets", web::get().to(timesheets::get_timesheets))
            .route(
                "/{id}/timesheets",
                web::post().to(timesheets::submit_timesheet),
            )
            .route(
                "/{id}/timesheets/{tid}/approve",
                web::post().to(timesheets::approve_timesheet),
            )
            .route(
                "/{id}/timesheets/{tid}/reject",
                web::post().to(timesheets::reject_timesheet),
            )
            .route("/{id}/invoices", web::get().to(invoices::get_invoices))
            .route("/{id}/invoices", web::post().to(invoices::create_invoice)),
    );

    // ── Admin oversight routes ──
    cfg.service(
        web::scope("/admin")
            .route("/stats", web::get().to(admin::stats))
            .route("/contracts", web::get().to(admin::all_contracts)),
    );
}
