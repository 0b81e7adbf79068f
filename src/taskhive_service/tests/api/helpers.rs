use reqwest::Response;
use secrecy::Secret;
use serde_json::{Value, json};
use taskhive_adapters::{
    AuthEmailNotifier, HashMapProjectStore, HashMapTokenStore, HashMapUserStore, JwtConfig,
    MockEmailClient,
};
use taskhive_core::Email;
use taskhive_service::TaskhiveService;

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub email_client: MockEmailClient,
}

impl TestApp {
    /// Spawn the full service on an ephemeral port with in-memory stores
    /// and the capturing email client.
    pub async fn spawn() -> Self {
        let user_store = HashMapUserStore::new();
        let token_store = HashMapTokenStore::new(600);
        let project_store = HashMapProjectStore::new();
        let email_client = MockEmailClient::new();
        let notifier =
            AuthEmailNotifier::new(email_client.clone(), "http://localhost:5173".to_string());
        let jwt = JwtConfig {
            jwt_secret: Secret::from("test-jwt-secret".to_string()),
            token_ttl_in_seconds: 600,
        };

        let service = TaskhiveService::new(user_store, token_store, project_store, notifier, jwt);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind an ephemeral port");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(service.run(listener, None));

        Self {
            address,
            client: reqwest::Client::new(),
            email_client,
        }
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn register(&self, name: &str, email: &str, password: &str) -> Response {
        self.post_json(
            "/api/auth/create-account",
            &json!({
                "name": name,
                "email": email,
                "password": password,
                "password_confirmation": password,
            }),
        )
        .await
    }

    pub async fn login(&self, email: &str, password: &str) -> Response {
        self.post_json(
            "/api/auth/login",
            &json!({ "email": email, "password": password }),
        )
        .await
    }

    /// The six-digit code from the latest e-mail sent to this address.
    pub async fn verification_code_for(&self, email: &str) -> String {
        let recipient = Email::parse(email).unwrap();
        let message = self
            .email_client
            .last_message_to(&recipient)
            .await
            .expect("no email was sent to this recipient");
        extract_six_digit_code(&message.content).expect("email carried no verification code")
    }

    /// Register, confirm via the mailed code, log in, and return the
    /// bearer token.
    pub async fn register_confirmed(&self, name: &str, email: &str, password: &str) -> String {
        let response = self.register(name, email, password).await;
        assert_eq!(response.status().as_u16(), 201);

        let code = self.verification_code_for(email).await;
        let response = self
            .post_json("/api/auth/verify-account", &json!({ "token": code }))
            .await;
        assert_eq!(response.status().as_u16(), 200);

        let response = self.login(email, password).await;
        assert_eq!(response.status().as_u16(), 200);
        response.text().await.unwrap()
    }

    pub async fn get_authed(&self, path: &str, token: &str) -> Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_authed(&self, path: &str, token: &str, body: &Value) -> Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_authed(&self, path: &str, token: &str, body: &Value) -> Response {
        self.client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn patch_authed(&self, path: &str, token: &str, body: &Value) -> Response {
        self.client
            .patch(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete_authed(&self, path: &str, token: &str) -> Response {
        self.client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Create a project and return its id from the listing.
    pub async fn create_project(&self, token: &str, name: &str) -> String {
        let response = self
            .post_authed(
                "/api/projects",
                token,
                &json!({
                    "projectName": name,
                    "clientName": "Acme",
                    "description": "A test project",
                }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201);

        let projects: Vec<Value> = self
            .get_authed("/api/projects", token)
            .await
            .json()
            .await
            .unwrap();
        projects
            .iter()
            .find(|p| p["projectName"] == name)
            .expect("created project missing from listing")["id"]
            .as_str()
            .unwrap()
            .to_string()
    }

    /// Create a task in a project and return its id.
    pub async fn create_task(&self, token: &str, project_id: &str, name: &str) -> String {
        let response = self
            .post_authed(
                &format!("/api/projects/{project_id}/tasks"),
                token,
                &json!({ "name": name, "description": "A test task" }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 201);

        let tasks: Vec<Value> = self
            .get_authed(&format!("/api/projects/{project_id}/tasks"), token)
            .await
            .json()
            .await
            .unwrap();
        tasks
            .iter()
            .find(|t| t["name"] == name)
            .expect("created task missing from listing")["id"]
            .as_str()
            .unwrap()
            .to_string()
    }

    /// Look a user up through the team-find endpoint and return their id.
    pub async fn find_user_id(&self, token: &str, project_id: &str, email: &str) -> String {
        let response = self
            .post_authed(
                &format!("/api/projects/{project_id}/team/find"),
                token,
                &json!({ "email": email }),
            )
            .await;
        assert_eq!(response.status().as_u16(), 200);
        let user: Value = response.json().await.unwrap();
        user["id"].as_str().unwrap().to_string()
    }
}

/// First maximal run of exactly six ascii digits in the message body.
fn extract_six_digit_code(content: &str) -> Option<String> {
    let mut run = String::new();
    for c in content.chars().chain(std::iter::once(' ')) {
        if c.is_ascii_digit() {
            run.push(c);
        } else {
            if run.len() == 6 {
                return Some(run);
            }
            run.clear();
        }
    }
    None
}
