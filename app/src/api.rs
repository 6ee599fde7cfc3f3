//! Typed gateway over the stateless client core.
//!
//! The sole chokepoint through which the controller talks to the server:
//! five methods, one normalized `ApiError` on any non-success outcome, no
//! retries, no caching — every call is a fresh round trip. Transport-level
//! failures (no response at all) normalize into `RequestFailed` tagged with
//! the same operation name the parse path would use.

use todo_core::{ApiError, CreateTodo, HttpRequest, HttpResponse, Todo, TodoClient, UpdateTodo};

use crate::transport::Transport;

/// Client API gateway: `TodoClient` request building/parsing plus a
/// `Transport` to carry the round trip.
pub struct Api<T> {
    client: TodoClient,
    transport: T,
}

impl<T: Transport> Api<T> {
    pub fn new(base_url: &str, transport: T) -> Self {
        Self {
            client: TodoClient::new(base_url),
            transport,
        }
    }

    pub fn list(&self) -> Result<Vec<Todo>, ApiError> {
        let request = self.client.build_list_todos();
        let response = self.execute("list", &request)?;
        self.client.parse_list_todos(response)
    }

    pub fn get(&self, id: &str) -> Result<Todo, ApiError> {
        let request = self.client.build_get_todo(id);
        let response = self.execute("get", &request)?;
        self.client.parse_get_todo(response)
    }

    pub fn create(&self, title: &str) -> Result<Todo, ApiError> {
        let input = CreateTodo {
            title: title.to_string(),
        };
        let request = self.client.build_create_todo(&input)?;
        let response = self.execute("create", &request)?;
        self.client.parse_create_todo(response)
    }

    pub fn update(&self, id: &str, input: &UpdateTodo) -> Result<Todo, ApiError> {
        let request = self.client.build_update_todo(id, input)?;
        let response = self.execute("update", &request)?;
        self.client.parse_update_todo(response)
    }

    pub fn delete(&self, id: &str) -> Result<(), ApiError> {
        let request = self.client.build_delete_todo(id);
        let response = self.execute("delete", &request)?;
        self.client.parse_delete_todo(response)
    }

    fn execute(&self, op: &'static str, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.transport
            .execute(request)
            .map_err(|err| ApiError::RequestFailed {
                op,
                status: None,
                body: err.to_string(),
            })
    }
}
