use crate::models::QodSession;
use nac_core::Result;
use nac_qod::QodClient;

/// Quality-of-service session operations.
#[derive(Debug, Clone, Copy)]
pub struct Sessions<'a> {
    qod: &'a QodClient,
}

impl<'a> Sessions<'a> {
    pub(crate) const fn new(qod: &'a QodClient) -> Self {
        Self { qod }
    }

    /// Fetch a session by its ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`](nac_core::Error::NotFound) for an unknown ID and
    /// [`Error::Unauthorized`](nac_core::Error::Unauthorized) for a rejected token.
    pub async fn get(&self, id: &str) -> Result<QodSession> {
        let info = self.qod.get_session(id).await?;
        Ok(QodSession::from_info(info, self.qod.clone()))
    }
}
