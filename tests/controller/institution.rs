use super::*;

fn new_university(name: &str, university_type: &str, state: &str, student_count: i32) -> Value {
    json!({
        "name": name,
        "universityType": university_type,
        "city": "Capital",
        "state": state,
        "studentCount": student_count
    })
}

#[tokio::test]
/// Expect the public listing to filter by type and look up universities with their colleges
async fn lists_and_gets_universities() -> Result<(), TestError> {
    let test = TestBuilder::new().with_institution_tables().build().await?;
    let delhi = test
        .institution()
        .insert_university("University of Delhi", 28.6889, 77.21)
        .await?;
    test.institution().insert_college(delhi.id, "Hindu College").await?;
    let app = test.app();

    let resp = send(app.clone(), get("/api/universities", None)).await;
    let listed: Value = json_body(resp, StatusCode::OK).await;
    assert_eq!(listed["pagination"]["totalItems"], 1);
    assert_eq!(listed["universities"][0]["name"], "University of Delhi");

    let resp = send(app.clone(), get("/api/universities?type=private", None)).await;
    let private: Value = json_body(resp, StatusCode::OK).await;
    assert_eq!(private["pagination"]["totalItems"], 0);

    let resp = send(app.clone(), get(&format!("/api/universities/{}", delhi.id), None)).await;
    let detail: Value = json_body(resp, StatusCode::OK).await;
    assert_eq!(detail["colleges"][0]["name"], "Hindu College");

    let resp = send(app, get(&format!("/api/universities/{}", delhi.id + 1), None)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
/// Expect only admins to add universities to the catalog
async fn create_requires_admin() -> Result<(), TestError> {
    let test = TestBuilder::new().with_institution_tables().build().await?;
    let admin = test.user().insert_admin("admin@example.com").await?;
    let owner = test.user().insert_owner("owner@example.com").await?;
    let body = new_university("Jawaharlal Nehru University", "central", "Delhi", 8000);
    let app = test.app();

    let resp = send(
        app.clone(),
        request(Method::POST, "/api/universities", Some(&test.token(&owner)), Some(&body)),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = send(
        app,
        request(Method::POST, "/api/universities", Some(&test.token(&admin)), Some(&body)),
    )
    .await;
    let created: Value = json_body(resp, StatusCode::CREATED).await;
    assert_eq!(created["studentCount"], 8000);
    assert_eq!(created["isActive"], true);

    Ok(())
}

#[tokio::test]
/// Expect statistics to be served from the static route rather than as a university ID
async fn serves_statistics() -> Result<(), TestError> {
    let test = TestBuilder::new().with_institution_tables().build().await?;
    let admin = test.user().insert_admin("admin@example.com").await?;
    let token = test.token(&admin);
    let app = test.app();

    for body in [
        new_university("University of Delhi", "central", "Delhi", 90000),
        new_university("University of Mumbai", "state", "Maharashtra", 60000),
        new_university("Savitribai Phule Pune University", "state", "Maharashtra", 70000),
    ] {
        let resp = send(
            app.clone(),
            request(Method::POST, "/api/universities", Some(&token), Some(&body)),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = send(app, get("/api/universities/stats", None)).await;
    let body: Value = json_body(resp, StatusCode::OK).await;
    assert_eq!(body["stats"]["totalUniversities"], 3);
    assert_eq!(body["stats"]["stateUniversities"], 2);
    assert_eq!(body["stats"]["totalStudents"], 220000);
    assert_eq!(body["stateWiseStats"][0]["state"], "Maharashtra");
    assert_eq!(body["stateWiseStats"][0]["students"], 130000);

    Ok(())
}
