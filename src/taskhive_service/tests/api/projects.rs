use serde_json::{Value, json};

use crate::helpers::TestApp;

#[tokio::test]
async fn project_crud_is_owner_gated() {
    let app = TestApp::spawn().await;
    let owner = app.register_confirmed("Ana", "ana@x.com", "password1").await;
    let outsider = app.register_confirmed("Bea", "bea@x.com", "password2").await;

    let project_id = app.create_project(&owner, "Website").await;

    // Outsiders cannot even read it; absent projects are 404.
    let response = app
        .get_authed(&format!("/api/projects/{project_id}"), &outsider)
        .await;
    assert_eq!(response.status().as_u16(), 403);
    let response = app
        .get_authed(
            "/api/projects/00000000-0000-0000-0000-000000000000",
            &owner,
        )
        .await;
    assert_eq!(response.status().as_u16(), 404);

    // Non-owner mutations are forbidden.
    let update = json!({
        "projectName": "Hijacked",
        "clientName": "Evil",
        "description": "nope",
    });
    let response = app
        .put_authed(&format!("/api/projects/{project_id}"), &outsider, &update)
        .await;
    assert_eq!(response.status().as_u16(), 403);
    let response = app
        .delete_authed(&format!("/api/projects/{project_id}"), &outsider)
        .await;
    assert_eq!(response.status().as_u16(), 403);

    // The owner updates and deletes.
    let update = json!({
        "projectName": "Webshop",
        "clientName": "Acme",
        "description": "Storefront",
    });
    let response = app
        .put_authed(&format!("/api/projects/{project_id}"), &owner, &update)
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let project: Value = app
        .get_authed(&format!("/api/projects/{project_id}"), &owner)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(project["projectName"], "Webshop");

    let response = app
        .delete_authed(&format!("/api/projects/{project_id}"), &owner)
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let response = app
        .get_authed(&format!("/api/projects/{project_id}"), &owner)
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn team_membership_add_and_remove() {
    let app = TestApp::spawn().await;
    let owner = app.register_confirmed("Ana", "ana@x.com", "password1").await;
    let member = app.register_confirmed("Bea", "bea@x.com", "password2").await;

    let project_id = app.create_project(&owner, "Website").await;
    let member_id = app.find_user_id(&owner, &project_id, "bea@x.com").await;

    // First add succeeds, second conflicts.
    let body = json!({ "id": member_id });
    let response = app
        .post_authed(&format!("/api/projects/{project_id}/team"), &owner, &body)
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let response = app
        .post_authed(&format!("/api/projects/{project_id}/team"), &owner, &body)
        .await;
    assert_eq!(response.status().as_u16(), 409);

    // The member now sees the project and the team listing.
    let projects: Vec<Value> = app
        .get_authed("/api/projects", &member)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(projects.len(), 1);
    let team: Vec<Value> = app
        .get_authed(&format!("/api/projects/{project_id}/team"), &owner)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(team.len(), 1);
    assert_eq!(team[0]["email"], "bea@x.com");

    // Members cannot manage the team themselves.
    let response = app
        .post_authed(&format!("/api/projects/{project_id}/team"), &member, &body)
        .await;
    assert_eq!(response.status().as_u16(), 403);

    // Removal, then removing again is a 404.
    let response = app
        .delete_authed(
            &format!("/api/projects/{project_id}/team/{member_id}"),
            &owner,
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let response = app
        .delete_authed(
            &format!("/api/projects/{project_id}/team/{member_id}"),
            &owner,
        )
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn unknown_team_candidates_are_not_found() {
    let app = TestApp::spawn().await;
    let owner = app.register_confirmed("Ana", "ana@x.com", "password1").await;
    let project_id = app.create_project(&owner, "Website").await;

    let response = app
        .post_authed(
            &format!("/api/projects/{project_id}/team/find"),
            &owner,
            &json!({ "email": "ghost@x.com" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 404);

    let response = app
        .post_authed(
            &format!("/api/projects/{project_id}/team"),
            &owner,
            &json!({ "id": "00000000-0000-0000-0000-000000000000" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn tasks_follow_the_owner_and_member_rules() {
    let app = TestApp::spawn().await;
    let owner = app.register_confirmed("Ana", "ana@x.com", "password1").await;
    let member = app.register_confirmed("Bea", "bea@x.com", "password2").await;

    let project_id = app.create_project(&owner, "Website").await;
    let member_id = app.find_user_id(&owner, &project_id, "bea@x.com").await;
    app.post_authed(
        &format!("/api/projects/{project_id}/team"),
        &owner,
        &json!({ "id": member_id }),
    )
    .await;

    // Members cannot create tasks.
    let response = app
        .post_authed(
            &format!("/api/projects/{project_id}/tasks"),
            &member,
            &json!({ "name": "Design", "description": "Mockups" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 403);

    let task_id = app.create_task(&owner, &project_id, "Design").await;

    // New tasks start pending; members may move the status freely.
    let task: Value = app
        .get_authed(
            &format!("/api/projects/{project_id}/tasks/{task_id}"),
            &member,
        )
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(task["status"], "pending");

    for status in ["completed", "onHold"] {
        let response = app
            .patch_authed(
                &format!("/api/projects/{project_id}/tasks/{task_id}/status"),
                &member,
                &json!({ "status": status }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 200);
    }

    // The history recorded both moves and who made them.
    let task: Value = app
        .get_authed(
            &format!("/api/projects/{project_id}/tasks/{task_id}"),
            &owner,
        )
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(task["status"], "onHold");
    let history = task["statusHistory"].as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["status"], "completed");
    assert_eq!(history[1]["changedBy"], task["statusHistory"][0]["changedBy"]);

    // Members cannot edit or delete the task itself.
    let response = app
        .put_authed(
            &format!("/api/projects/{project_id}/tasks/{task_id}"),
            &member,
            &json!({ "name": "X", "description": "Y" }),
        )
        .await;
    assert_eq!(response.status().as_u16(), 403);
    let response = app
        .delete_authed(
            &format!("/api/projects/{project_id}/tasks/{task_id}"),
            &member,
        )
        .await;
    assert_eq!(response.status().as_u16(), 403);

    let response = app
        .delete_authed(
            &format!("/api/projects/{project_id}/tasks/{task_id}"),
            &owner,
        )
        .await;
    assert_eq!(response.status().as_u16(), 200);
    let response = app
        .get_authed(
            &format!("/api/projects/{project_id}/tasks/{task_id}"),
            &owner,
        )
        .await;
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn notes_belong_to_their_authors() {
    let app = TestApp::spawn().await;
    let owner = app.register_confirmed("Ana", "ana@x.com", "password1").await;
    let member = app.register_confirmed("Bea", "bea@x.com", "password2").await;

    let project_id = app.create_project(&owner, "Website").await;
    let member_id = app.find_user_id(&owner, &project_id, "bea@x.com").await;
    app.post_authed(
        &format!("/api/projects/{project_id}/team"),
        &owner,
        &json!({ "id": member_id }),
    )
    .await;
    let task_id = app.create_task(&owner, &project_id, "Design").await;

    let notes_path = format!("/api/projects/{project_id}/tasks/{task_id}/notes");

    let response = app
        .post_authed(&notes_path, &member, &json!({ "content": "Looks good" }))
        .await;
    assert_eq!(response.status().as_u16(), 201);

    let notes: Vec<Value> = app
        .get_authed(&notes_path, &owner)
        .await
        .json()
        .await
        .unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0]["content"], "Looks good");
    let note_id = notes[0]["id"].as_str().unwrap();

    // Only the author may delete it, even against the project owner.
    let response = app
        .delete_authed(&format!("{notes_path}/{note_id}"), &owner)
        .await;
    assert_eq!(response.status().as_u16(), 403);
    let response = app
        .delete_authed(&format!("{notes_path}/{note_id}"), &member)
        .await;
    assert_eq!(response.status().as_u16(), 200);

    let notes: Vec<Value> = app
        .get_authed(&notes_path, &owner)
        .await
        .json()
        .await
        .unwrap();
    assert!(notes.is_empty());

    // Empty content is rejected up front.
    let response = app
        .post_authed(&notes_path, &member, &json!({ "content": "   " }))
        .await;
    assert_eq!(response.status().as_u16(), 400);
}
