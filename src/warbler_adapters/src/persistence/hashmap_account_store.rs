use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use warbler_core::{AccountId, AccountStore, AccountStoreError, Email, MIN_PASSWORD_LENGTH, Password};

#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub email: Email,
    pub created_at: DateTime<Utc>,
}

/// Account store kept in process memory. Passwords are checked for strength
/// and then dropped; nothing can log in against this store.
#[derive(Default, Clone)]
pub struct HashMapAccountStore {
    accounts: Arc<RwLock<HashMap<Email, Account>>>,
}

impl HashMapAccountStore {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn get_account(&self, email: &Email) -> Option<Account> {
        self.accounts.read().await.get(email).cloned()
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.accounts.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl AccountStore for HashMapAccountStore {
    #[tracing::instrument(name = "Creating account in memory", skip_all)]
    async fn create_account(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<AccountId, AccountStoreError> {
        if password.is_weak() {
            return Err(AccountStoreError::InvalidCredentials(format!(
                "password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(email) {
            return Err(AccountStoreError::DuplicateEmail);
        }

        let account = Account {
            id: AccountId::generate(),
            email: email.clone(),
            created_at: Utc::now(),
        };
        let id = account.id.clone();
        accounts.insert(email.clone(), account);
        Ok(id)
    }
}
