// Holds the map selection state for the window

use tokio::sync::Mutex;
use vmap_core::{Controller, GenerationClient};

pub struct MapSession {
    pub controller: Mutex<Controller>,
    pub client: GenerationClient,
}

impl MapSession {
    pub fn new(client: GenerationClient) -> Self {
        Self {
            controller: Mutex::new(Controller::new()),
            client,
        }
    }
}
