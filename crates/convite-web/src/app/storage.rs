use convite_core::{
  MemorySession,
  SessionStore
};

/// Session keys kept in the browser's
/// `localStorage`.
///
/// Falls back to memory when storage is
/// unavailable (private mode, disabled
/// cookies), so the gate still answers
/// for the current page.
pub struct LocalStorageSession {
  storage:  Option<web_sys::Storage>,
  fallback: MemorySession
}

impl LocalStorageSession {
  pub fn open() -> Self {
    let storage = web_sys::window()
      .and_then(|window| {
        window
          .local_storage()
          .ok()
          .flatten()
      });
    if storage.is_none() {
      tracing::warn!(
        "localStorage unavailable; \
         session is not persisted"
      );
    }

    Self {
      storage,
      fallback: MemorySession::new()
    }
  }
}

impl SessionStore for LocalStorageSession {
  fn get(
    &self,
    key: &str
  ) -> Option<String> {
    match &self.storage {
      | Some(storage) => storage
        .get_item(key)
        .ok()
        .flatten(),
      | None => self.fallback.get(key)
    }
  }

  fn set(
    &mut self,
    key: &str,
    value: &str
  ) {
    match &self.storage {
      | Some(storage) => {
        if let Err(err) =
          storage.set_item(key, value)
        {
          tracing::warn!(
            key,
            error = ?err,
            "failed to persist session key"
          );
        }
      }
      | None => {
        self.fallback.set(key, value)
      }
    }
  }

  fn remove(&mut self, key: &str) {
    match &self.storage {
      | Some(storage) => {
        if let Err(err) =
          storage.remove_item(key)
        {
          tracing::warn!(
            key,
            error = ?err,
            "failed to clear session key"
          );
        }
      }
      | None => self.fallback.remove(key)
    }
  }
}
