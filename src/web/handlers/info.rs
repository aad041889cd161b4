//! Unauthenticated informational handlers.

use axum::Json;
use serde_json::{json, Value};

/// GET /api - Liveness and entry-point summary.
pub async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "message": "Courrier API - operational",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "auth": "/api/auth",
            "messages": "/api/messages",
            "receptions": "/api/receptions",
            "contacts": "/api/contacts",
            "dossiers": "/api/dossiers"
        }
    }))
}

/// GET /api/info - Route catalogue.
pub async fn info() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "name": "Courrier API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "REST backend for a webmail-style messaging application",
            "endpoints": {
                "authentication": {
                    "register": "POST /auth/register",
                    "login": "POST /auth/login",
                    "profile": "GET /auth/profile",
                    "updateProfile": "PUT /auth/profile",
                    "changePassword": "PUT /auth/change-password",
                    "verifyToken": "GET /auth/verify-token"
                },
                "messages": {
                    "create": "POST /messages",
                    "getAll": "GET /messages",
                    "getOne": "GET /messages/:id",
                    "update": "PUT /messages/:id",
                    "delete": "DELETE /messages/:id",
                    "deletePermanent": "DELETE /messages/:id/permanent",
                    "sendDraft": "POST /messages/:id/send",
                    "stats": "GET /messages/stats"
                },
                "receptions": {
                    "getAll": "GET /receptions",
                    "getOne": "GET /receptions/:id",
                    "markAsRead": "PUT /receptions/:id/read",
                    "updateState": "PUT /receptions/:id/state",
                    "moveToFolder": "PUT /receptions/:id/move",
                    "delete": "DELETE /receptions/:id",
                    "deletePermanent": "DELETE /receptions/:id/permanent",
                    "stats": "GET /receptions/stats",
                    "markAllAsRead": "POST /receptions/mark-all-read"
                },
                "contacts": {
                    "getAll": "GET /contacts",
                    "getOne": "GET /contacts/:id",
                    "add": "POST /contacts",
                    "delete": "DELETE /contacts/:id",
                    "search": "GET /contacts/search",
                    "searchUsers": "GET /contacts/search-users",
                    "checkStatus": "GET /contacts/check/:user_id",
                    "stats": "GET /contacts/stats"
                },
                "dossiers": {
                    "getAll": "GET /dossiers",
                    "getOne": "GET /dossiers/:id",
                    "create": "POST /dossiers",
                    "update": "PUT /dossiers/:id",
                    "delete": "DELETE /dossiers/:id",
                    "getMessages": "GET /dossiers/:id/messages",
                    "moveMessages": "POST /dossiers/:id/move-messages",
                    "stats": "GET /dossiers/stats"
                }
            }
        }
    }))
}
