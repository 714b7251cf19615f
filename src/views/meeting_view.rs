use crate::api::ApiClient;
use crate::error::{CommunityError, CommunityResult};
use crate::model::{Id, Meeting, MeetingAction};
use crate::ops::meeting_ops;

/// One meeting as the admin sees it, with an optional edit draft.
///
/// Every mutation goes to the server first and then re-fetches, so the view
/// always shows the server's last answer.
#[derive(Debug, Clone)]
pub struct MeetingView {
    meeting: Meeting,
    draft: Option<Meeting>,
}

impl MeetingView {
    pub fn load(client: &ApiClient, id: Id<Meeting>) -> CommunityResult<Self> {
        Ok(Self::from_meeting(meeting_ops::get_meeting(client, id)?))
    }

    pub fn from_meeting(meeting: Meeting) -> Self {
        Self { meeting, draft: None }
    }

    pub fn meeting(&self) -> &Meeting {
        &self.meeting
    }

    pub fn actions(&self) -> &'static [MeetingAction] {
        self.meeting.status.actions()
    }

    pub fn can(&self, action: MeetingAction) -> bool {
        self.meeting.status.allows(action)
    }

    fn require(&self, action: MeetingAction) -> CommunityResult<()> {
        if self.can(action) {
            Ok(())
        } else {
            Err(CommunityError::ActionUnavailable {
                action: action.verb().to_string(),
                status: self.meeting.status.to_api_str().to_string(),
            })
        }
    }

    pub fn reload(&mut self, client: &ApiClient) -> CommunityResult<()> {
        self.meeting = meeting_ops::get_meeting(client, self.meeting.id)?;
        Ok(())
    }

    pub fn open(&mut self, client: &ApiClient) -> CommunityResult<()> {
        self.require(MeetingAction::Open)?;
        meeting_ops::open_meeting(client, self.meeting.id)?;
        self.reload(client)
    }

    pub fn close(&mut self, client: &ApiClient) -> CommunityResult<()> {
        self.require(MeetingAction::Close)?;
        meeting_ops::close_meeting(client, self.meeting.id)?;
        self.reload(client)
    }

    /// Asks the server for a fresh code and returns it.
    pub fn generate_code(&mut self, client: &ApiClient) -> CommunityResult<String> {
        self.require(MeetingAction::GenerateCode)?;
        let issued = meeting_ops::generate_attendance_code(client, self.meeting.id)?;
        self.reload(client)?;
        Ok(issued.code)
    }

    pub fn delete(self, client: &ApiClient) -> CommunityResult<()> {
        self.require(MeetingAction::Delete)?;
        meeting_ops::delete_meeting(client, self.meeting.id)
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// Starts (or continues) editing a copy of the last fetched record.
    pub fn begin_edit(&mut self) -> CommunityResult<&mut Meeting> {
        self.require(MeetingAction::Edit)?;
        if self.draft.is_none() {
            self.draft = Some(self.meeting.clone());
        }
        self.draft
            .as_mut()
            .ok_or_else(|| CommunityError::Other("no draft".into()))
    }

    pub fn draft(&self) -> Option<&Meeting> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut Meeting> {
        self.draft.as_mut()
    }

    /// Drops the draft; the view shows the last fetched record again.
    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    /// PUTs the full draft, then re-fetches. A failed save keeps the draft so
    /// it can be corrected.
    pub fn save(&mut self, client: &ApiClient) -> CommunityResult<()> {
        let draft = self
            .draft
            .take()
            .ok_or_else(|| CommunityError::Other("nothing to save".into()))?;

        if let Err(e) = meeting_ops::update_meeting(client, &draft) {
            self.draft = Some(draft);
            return Err(e);
        }
        self.reload(client)
    }
}
