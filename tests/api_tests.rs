// tests/api_tests.rs

use quiz_api::{catalog::Catalog, config::Config, routes, state::AppState};
use serde_json::{Value, json};

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    // Every test gets its own catalog and results log.
    let state = AppState::new(Catalog::builtin(), Config::default());
    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn submit(client: &reqwest::Client, address: &str, quiz_id: &str, body: Value) -> reqwest::Response {
    client
        .post(format!("{}/api/quiz/{}/submit", address, quiz_id))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request")
}

async fn get_json(client: &reqwest::Client, url: String) -> Value {
    client
        .get(url)
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .expect("Failed to parse json")
}

#[tokio::test]
async fn unknown_path_is_404() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn health_check_works() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let body = get_json(&client, format!("{}/health", address)).await;

    assert_eq!(body["status"], "OK");
    let timestamp = body["timestamp"].as_str().expect("timestamp is a string");
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn list_quizzes_in_catalog_order() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let body = get_json(&client, format!("{}/api/quizzes", address)).await;

    assert_eq!(
        body,
        json!({"quizzes": [
            {"id": "general", "title": "General Knowledge Quiz", "questionCount": 10},
            {"id": "science", "title": "Science Quiz", "questionCount": 5}
        ]})
    );
}

#[tokio::test]
async fn get_quiz_hides_answers() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let body = get_json(&client, format!("{}/api/quiz/general", address)).await;

    assert_eq!(body["id"], "general");
    assert_eq!(body["title"], "General Knowledge Quiz");
    let questions = body["questions"].as_array().unwrap();
    assert_eq!(questions.len(), 10);
    for q in questions {
        assert!(q.get("correctAnswer").is_none());
        assert!(q["question"].is_string());
        assert!(q["options"].as_array().unwrap().len() >= 2);
    }
    assert_eq!(questions[0]["question"], "What is the capital of France?");
}

#[tokio::test]
async fn get_unknown_quiz_is_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/quiz/nonexistent", address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 404);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "Quiz not found"}));
}

#[tokio::test]
async fn submit_scores_against_full_question_count() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = submit(
        &client,
        &address,
        "general",
        json!({
            "answers": [
                {"questionId": 1, "answer": 2},
                {"questionId": 2, "answer": 1},
                {"questionId": 3, "answer": 0}
            ],
            "timeSpent": 30
        }),
    )
    .await;

    assert_eq!(response.status().as_u16(), 200);
    let result: Value = response.json().await.unwrap();
    assert_eq!(result["quizId"], "general");
    assert_eq!(result["score"], 2);
    assert_eq!(result["totalQuestions"], 10);
    assert_eq!(result["percentage"], "20.00");
    assert_eq!(result["timeSpent"].as_f64(), Some(30.0));

    let details = result["detailedResults"].as_array().unwrap();
    assert_eq!(details.len(), 3);
    assert_eq!(details[2]["questionId"], 3);
    assert_eq!(details[2]["userAnswer"], 0);
    assert_eq!(details[2]["correctAnswer"], 1);
    assert_eq!(details[2]["correct"], false);
    assert!(result["timestamp"].is_string());
}

#[tokio::test]
async fn submit_drops_unknown_questions_and_scores_timeouts_wrong() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let result: Value = submit(
        &client,
        &address,
        "science",
        json!({
            "answers": [
                {"questionId": 1, "answer": 2},
                {"questionId": 42, "answer": 0},
                {"questionId": 2, "answer": null},
                {"questionId": 3, "correct": true}
            ],
            "timeSpent": 12
        }),
    )
    .await
    .json()
    .await
    .unwrap();

    assert_eq!(result["score"], 1);
    assert_eq!(result["totalQuestions"], 5);
    assert_eq!(result["percentage"], "20.00");
    let ids: Vec<i64> = result["detailedResults"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["questionId"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn submit_rejects_non_array_answers() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = submit(
        &client,
        &address,
        "general",
        json!({"answers": "not-an-array", "timeSpent": 5}),
    )
    .await;

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "Invalid answers format"}));

    // Nothing was recorded
    let stats = get_json(&client, format!("{}/api/stats/general", address)).await;
    assert_eq!(stats["totalAttempts"], 0);
}

#[tokio::test]
async fn submit_rejects_missing_answers_and_negative_time() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let missing = submit(&client, &address, "general", json!({"timeSpent": 5})).await;
    assert_eq!(missing.status().as_u16(), 400);

    let negative = submit(
        &client,
        &address,
        "general",
        json!({"answers": [], "timeSpent": -3}),
    )
    .await;
    assert_eq!(negative.status().as_u16(), 400);

    let stats = get_json(&client, format!("{}/api/stats/general", address)).await;
    assert_eq!(stats["totalAttempts"], 0);
}

#[tokio::test]
async fn submit_to_unknown_quiz_is_404_and_leaves_stats_empty() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = submit(
        &client,
        &address,
        "nonexistent",
        json!({"answers": [{"questionId": 1, "answer": 0}], "timeSpent": 1}),
    )
    .await;
    assert_eq!(response.status().as_u16(), 404);

    let stats = get_json(&client, format!("{}/api/stats/nonexistent", address)).await;
    assert_eq!(
        stats,
        json!({"quizId": "nonexistent", "totalAttempts": 0, "averageScore": 0, "highestScore": 0})
    );
}

#[tokio::test]
async fn stats_aggregate_attempts() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Scores 1, 2, 2 on the science quiz
    for answers in [
        json!([{"questionId": 1, "answer": 2}]),
        json!([{"questionId": 1, "answer": 2}, {"questionId": 2, "answer": 1}]),
        json!([{"questionId": 4, "answer": 2}, {"questionId": 5, "answer": 2}]),
    ] {
        let response = submit(
            &client,
            &address,
            "science",
            json!({"answers": answers, "timeSpent": 10}),
        )
        .await;
        assert_eq!(response.status().as_u16(), 200);
    }

    let stats = get_json(&client, format!("{}/api/stats/science", address)).await;
    assert_eq!(
        stats,
        json!({"quizId": "science", "totalAttempts": 3, "averageScore": "1.67", "highestScore": 2})
    );

    // Other quizzes are unaffected
    let other = get_json(&client, format!("{}/api/stats/general", address)).await;
    assert_eq!(other["totalAttempts"], 0);
}

#[tokio::test]
async fn stats_average_rounds_halves_up() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Seven attempts scoring 2 and one scoring 3: mean 17 / 8 = 2.125
    let two = json!([{"questionId": 1, "answer": 2}, {"questionId": 2, "answer": 1}]);
    let three = json!([
        {"questionId": 1, "answer": 2},
        {"questionId": 2, "answer": 1},
        {"questionId": 3, "answer": 0}
    ]);
    for i in 0..8 {
        let answers = if i == 0 { three.clone() } else { two.clone() };
        let response = submit(
            &client,
            &address,
            "science",
            json!({"answers": answers, "timeSpent": 10}),
        )
        .await;
        assert_eq!(response.status().as_u16(), 200);
    }

    let stats = get_json(&client, format!("{}/api/stats/science", address)).await;
    assert_eq!(stats["totalAttempts"], 8);
    assert_eq!(stats["averageScore"], "2.13");
    assert_eq!(stats["highestScore"], 3);
}

#[tokio::test]
async fn leaderboard_ranks_top_ten() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // 12 attempts: score = i % 3 correct answers, time = 100 - i
    for i in 0..12 {
        let correct = i % 3;
        let answers: Vec<Value> = [(1, 2), (2, 1)]
            .iter()
            .take(correct)
            .map(|(q, a)| json!({"questionId": q, "answer": a}))
            .collect();
        let response = submit(
            &client,
            &address,
            "science",
            json!({"answers": answers, "timeSpent": 100 - i}),
        )
        .await;
        assert_eq!(response.status().as_u16(), 200);
    }

    let body = get_json(&client, format!("{}/api/leaderboard/science", address)).await;
    let board = body["leaderboard"].as_array().unwrap();
    assert_eq!(board.len(), 10);

    for pair in board.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let (sa, sb) = (a["score"].as_u64().unwrap(), b["score"].as_u64().unwrap());
        let (ta, tb) = (a["timeSpent"].as_f64().unwrap(), b["timeSpent"].as_f64().unwrap());
        assert!(sa > sb || (sa == sb && ta <= tb));
    }
    assert_eq!(board[0]["score"], 2);
    assert_eq!(board[0]["timeSpent"].as_f64(), Some(89.0));
    // Full results, not trimmed
    assert!(board[0]["detailedResults"].is_array());

    let empty = get_json(&client, format!("{}/api/leaderboard/nonexistent", address)).await;
    assert_eq!(empty, json!({"leaderboard": []}));
}

#[tokio::test]
async fn separate_apps_do_not_share_results() {
    let first = spawn_app().await;
    let second = spawn_app().await;
    let client = reqwest::Client::new();

    submit(
        &client,
        &first,
        "general",
        json!({"answers": [], "timeSpent": 1}),
    )
    .await;

    let a = get_json(&client, format!("{}/api/stats/general", first)).await;
    let b = get_json(&client, format!("{}/api/stats/general", second)).await;
    assert_eq!(a["totalAttempts"], 1);
    assert_eq!(b["totalAttempts"], 0);
}
