use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the Cluetrail backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sse::event_stream,
        crate::routes::websocket::ws_handler,
        crate::routes::websocket::recent_messages,
        crate::routes::game::get_game,
        crate::routes::game::start_run,
        crate::routes::actions::poison,
        crate::routes::actions::unpoison,
        crate::routes::actions::safe_mark,
        crate::routes::actions::kill,
        crate::routes::actions::revive,
        crate::routes::tags::tag_view,
        crate::routes::tags::attempt,
        crate::routes::tags::final_code,
        crate::routes::players::register,
        crate::routes::players::list_players,
        crate::routes::players::sign_in,
        crate::routes::players::verify,
        crate::routes::players::list_characters,
        crate::routes::players::create_character,
        crate::routes::players::assign_character,
        crate::routes::survey::submit_survey,
        crate::routes::survey::survey_results,
        crate::routes::survey::clear_survey,
        crate::routes::contact::submit_contact,
        crate::routes::push::push_subscribe,
        crate::routes::push::push_unsubscribe,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::common::AckResponse,
            crate::dto::game::GameView,
            crate::dto::tag::TagView,
            crate::dto::tag::AttemptRequest,
            crate::dto::tag::AttemptResponse,
            crate::dto::tag::FinalRequest,
            crate::dto::tag::FinalResponse,
            crate::dto::chat::ClientFrame,
            crate::dto::chat::MessagesResponse,
            crate::dao::models::CharacterRecord,
        )
    ),
    tags(
        (name = "game", description = "Game snapshot and game-master controls"),
        (name = "actions", description = "Timed role actions"),
        (name = "tags", description = "Tag content, passphrases, and the final code"),
        (name = "players", description = "Registration, sign-in, and characters"),
        (name = "survey", description = "Intake survey"),
        (name = "contact", description = "Contact form"),
        (name = "push", description = "Push subscription bookkeeping"),
        (name = "realtime", description = "WebSocket and SSE streams"),
    )
)]
pub struct ApiDoc;
