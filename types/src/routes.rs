//! Read endpoints of the sandbox showcase API.
//!
//! Every route is scoped to one sandbox. Line-of-business (LOB) routes are
//! additionally scoped to one LOB inside that sandbox.

use uuid::Uuid;

use crate::RequestDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SandboxRoutes {
    sandbox_id: Uuid,
}

impl SandboxRoutes {
    #[must_use]
    pub const fn new(sandbox_id: Uuid) -> Self {
        Self { sandbox_id }
    }

    #[must_use]
    pub const fn sandbox_id(&self) -> Uuid {
        self.sandbox_id
    }

    /// `/sandboxes/{sandbox_id}`
    #[must_use]
    pub fn sandbox(&self) -> RequestDescriptor {
        RequestDescriptor::new("/sandboxes/", self.sandbox_id.to_string())
    }

    /// `/sandboxes/{sandbox_id}/lobs`
    #[must_use]
    pub fn lobs(&self) -> RequestDescriptor {
        RequestDescriptor::new(self.sandbox_base(), "lobs")
    }

    /// `/sandboxes/{sandbox_id}/lobs/{lob_id}`
    #[must_use]
    pub fn lob(&self, lob_id: Uuid) -> RequestDescriptor {
        RequestDescriptor::new(format!("{}lobs/", self.sandbox_base()), lob_id.to_string())
    }

    #[must_use]
    pub fn out_of_band_messages(&self, lob_id: Uuid) -> RequestDescriptor {
        RequestDescriptor::new(self.lob_base(lob_id), "out-of-band-msgs")
    }

    /// Credential offers the LOB's wallet has received.
    #[must_use]
    pub fn credential_offers(&self, lob_id: Uuid) -> RequestDescriptor {
        RequestDescriptor::new(self.lob_base(lob_id), "credential-offer")
    }

    /// Credentials held by the LOB's wallet.
    #[must_use]
    pub fn credentials(&self, lob_id: Uuid) -> RequestDescriptor {
        RequestDescriptor::new(self.lob_base(lob_id), "credentials")
    }

    fn sandbox_base(&self) -> String {
        format!("/sandboxes/{}/", self.sandbox_id)
    }

    fn lob_base(&self, lob_id: Uuid) -> String {
        format!("/sandboxes/{}/lobs/{lob_id}/", self.sandbox_id)
    }
}
