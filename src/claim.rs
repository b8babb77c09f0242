use crate::attachment::Attachment;
use crate::catalogue::{activities, Activity};
use crate::range::{DateRange, RangeError};
use thiserror::Error;
use time::{Date, Duration};
use tracing::{debug, info};

/// A completed request for CPD points
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Claim {
    pub(crate) activity: Activity,
    pub(crate) start: Date,
    pub(crate) end: Date,
    pub(crate) description: String,
    pub(crate) attachment: Attachment,
}

/// The claim being filled in
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ClaimForm {
    activities: Vec<Activity>,
    selected: usize,
    range: DateRange,
    description: String,
    attachment: Option<Attachment>,
}

impl ClaimForm {
    pub(crate) fn new() -> ClaimForm {
        ClaimForm {
            activities: activities(),
            selected: 0,
            range: DateRange::new(),
            description: String::new(),
            attachment: None,
        }
    }

    pub(crate) fn activity(&self) -> Activity {
        self.activities[self.selected]
    }

    pub(crate) fn next_activity(&mut self) {
        self.selected = (self.selected + 1) % self.activities.len();
    }

    pub(crate) fn previous_activity(&mut self) {
        self.selected = self
            .selected
            .checked_sub(1)
            .unwrap_or(self.activities.len() - 1);
    }

    pub(crate) fn range(&self) -> &DateRange {
        &self.range
    }

    pub(crate) fn set_start(&mut self, date: Option<Date>) -> Result<(), RangeError> {
        self.range.set_start(date)
    }

    pub(crate) fn set_end(&mut self, date: Option<Date>) -> Result<(), RangeError> {
        self.range.set_end(date)
    }

    pub(crate) fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn push_description(&mut self, ch: char) {
        self.description.push(ch);
    }

    pub(crate) fn pop_description(&mut self) -> bool {
        self.description.pop().is_some()
    }

    pub(crate) fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    pub(crate) fn attach(&mut self, attachment: Attachment) {
        self.attachment = Some(attachment);
    }

    pub(crate) fn remove_attachment(&mut self) -> bool {
        self.attachment.take().is_some()
    }

    /// Clears everything except the chosen activity
    pub(crate) fn reset(&mut self) {
        self.range.reset();
        self.description.clear();
        self.attachment = None;
    }

    pub(crate) fn build(&self) -> Result<Claim, MissingInfoError> {
        let attachment = self.attachment.clone().ok_or(MissingInfoError)?;
        let start = self.range.start().ok_or(MissingInfoError)?;
        let end = self.range.end().ok_or(MissingInfoError)?;
        let description = self.description.trim();
        if description.is_empty() {
            return Err(MissingInfoError);
        }
        Ok(Claim {
            activity: self.activity(),
            start,
            end,
            description: description.to_owned(),
            attachment,
        })
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("Please fill all required fields.")]
pub(crate) struct MissingInfoError;

/// Points required to meet the target for the current accreditation year
pub(crate) const TARGET_POINTS: u32 = 10;

/// Points still needed to meet [`TARGET_POINTS`]
pub(crate) fn points_needed(score: u32) -> u32 {
    TARGET_POINTS.saturating_sub(score)
}

/// Acknowledgement of an accepted claim
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Receipt {
    pub(crate) claim_no: usize,
    pub(crate) points: u32,
}

/// Where a claim stands in review.  Every claim starts out pending.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ClaimStatus {
    Pending,
    Approved,
    Rejected,
}

impl ClaimStatus {
    pub(crate) fn label(self) -> &'static str {
        match self {
            ClaimStatus::Pending => "PENDING",
            ClaimStatus::Approved => "APPROVED",
            ClaimStatus::Rejected => "REJECTED",
        }
    }
}

/// A submitted claim as it appears in the member's history
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ClaimRecord {
    pub(crate) claim_no: usize,
    pub(crate) activity: Activity,
    pub(crate) start: Date,
    pub(crate) end: Date,
    pub(crate) description: String,
    pub(crate) status: ClaimStatus,
}

impl ClaimRecord {
    fn is_same_claim(&self, claim: &Claim) -> bool {
        self.activity == claim.activity
            && self.start == claim.start
            && self.end == claim.end
            && self.description == claim.description
    }
}

/// Where submitted claims go
pub(crate) trait ClaimSink {
    fn submit(&mut self, claim: &Claim) -> Result<Receipt, SubmitError>;

    /// Every claim submitted so far, oldest first
    fn history(&self) -> &[ClaimRecord];

    /// Total points accrued from approved claims
    fn score(&self) -> u32 {
        self.history()
            .iter()
            .filter(|r| r.status == ClaimStatus::Approved)
            .map(|r| r.activity.points)
            .sum()
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum SubmitError {
    #[error("claim rejected: {0}")]
    Rejected(String),
}

/// Keeps submitted claims in memory for the life of the process
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct MemorySink {
    records: Vec<ClaimRecord>,
}

impl MemorySink {
    pub(crate) fn new() -> MemorySink {
        MemorySink::default()
    }

    /// A sink already holding one reviewed or pending claim per catalogue
    /// activity, spread over the months before `today`
    pub(crate) fn with_sample_history(today: Date) -> MemorySink {
        let samples = [
            (120, "Quarterly trade journal", ClaimStatus::Approved),
            (75, "Annual surveyors' conference", ClaimStatus::Rejected),
            (40, "Hull inspection e-learning", ClaimStatus::Approved),
            (6, "Report writing workshop", ClaimStatus::Pending),
        ];
        let mut sink = MemorySink::new();
        for (activity, (days_ago, description, status)) in activities().into_iter().zip(samples) {
            let ago = Duration::days(days_ago);
            let date = today.checked_sub(ago).unwrap_or(today);
            let claim_no = sink.record(activity, date, date, description);
            sink.review(claim_no, status);
        }
        sink
    }

    /// Sets the review outcome of a claim.  Returns `false` if there is no
    /// such claim.
    pub(crate) fn review(&mut self, claim_no: usize, status: ClaimStatus) -> bool {
        match self.records.iter_mut().find(|r| r.claim_no == claim_no) {
            Some(record) => {
                debug!(claim_no, status = status.label(), "claim reviewed");
                record.status = status;
                true
            }
            None => false,
        }
    }

    fn record(&mut self, activity: Activity, start: Date, end: Date, description: &str) -> usize {
        let claim_no = self.records.len() + 1;
        self.records.push(ClaimRecord {
            claim_no,
            activity,
            start,
            end,
            description: description.to_owned(),
            status: ClaimStatus::Pending,
        });
        claim_no
    }
}

impl ClaimSink for MemorySink {
    fn submit(&mut self, claim: &Claim) -> Result<Receipt, SubmitError> {
        if self.records.iter().any(|r| r.is_same_claim(claim)) {
            return Err(SubmitError::Rejected(String::from(
                "an identical claim was already submitted",
            )));
        }
        let receipt = Receipt {
            claim_no: self.record(claim.activity, claim.start, claim.end, &claim.description),
            points: claim.activity.points,
        };
        info!(
            claim_no = receipt.claim_no,
            activity = claim.activity.id,
            points = receipt.points,
            start = %claim.start,
            end = %claim.end,
            description = claim.description.as_str(),
            evidence = %claim.attachment.path.display(),
            mime_type = claim.attachment.mime_type,
            "claim recorded"
        );
        Ok(receipt)
    }

    fn history(&self) -> &[ClaimRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachment::AttachmentKind;
    use std::path::PathBuf;
    use time::macros::date;

    fn attachment() -> Attachment {
        Attachment {
            path: PathBuf::from("/tmp/receipt.pdf"),
            name: String::from("receipt.pdf"),
            kind: AttachmentKind::Document,
            mime_type: "application/pdf",
            size: 1024,
        }
    }

    fn filled_form() -> ClaimForm {
        let mut form = ClaimForm::new();
        form.attach(attachment());
        form.set_start(Some(date!(2026 - 09 - 01))).unwrap();
        form.set_end(Some(date!(2026 - 09 - 03))).unwrap();
        for ch in "Annual conference".chars() {
            form.push_description(ch);
        }
        form
    }

    #[test]
    fn test_build_complete_claim() {
        let mut form = filled_form();
        form.next_activity();
        let claim = form.build().unwrap();
        assert_eq!(claim.activity.points, 2);
        assert_eq!(claim.start, date!(2026 - 09 - 01));
        assert_eq!(claim.end, date!(2026 - 09 - 03));
        assert_eq!(claim.description, "Annual conference");
        assert_eq!(claim.attachment.name, "receipt.pdf");
    }

    #[test]
    fn test_missing_fields() {
        let mut form = filled_form();
        assert!(form.remove_attachment());
        assert_eq!(form.build(), Err(MissingInfoError));

        let mut form = filled_form();
        form.set_end(None).unwrap();
        assert_eq!(form.build(), Err(MissingInfoError));

        let mut form = filled_form();
        while form.pop_description() {}
        form.push_description(' ');
        assert_eq!(form.build(), Err(MissingInfoError));
    }

    #[test]
    fn test_reset_keeps_activity() {
        let mut form = filled_form();
        form.previous_activity();
        assert_eq!(form.activity().points, 4);
        form.reset();
        assert_eq!(form.activity().points, 4);
        assert_eq!(form.description(), "");
        assert_eq!(form.attachment(), None);
        assert_eq!(*form.range(), DateRange::new());
    }

    #[test]
    fn test_activity_cycles() {
        let mut form = ClaimForm::new();
        for _ in 0..4 {
            form.next_activity();
        }
        assert_eq!(form.activity().points, 1);
    }

    #[test]
    fn test_score_counts_only_approved_claims() {
        let mut sink = MemorySink::new();
        assert_eq!(sink.score(), 0);
        let mut form = filled_form();
        let receipt = sink.submit(&form.build().unwrap()).unwrap();
        assert_eq!(
            receipt,
            Receipt {
                claim_no: 1,
                points: 1,
            }
        );
        form.next_activity();
        form.next_activity();
        let receipt = sink.submit(&form.build().unwrap()).unwrap();
        assert_eq!(
            receipt,
            Receipt {
                claim_no: 2,
                points: 3,
            }
        );
        assert!(sink
            .history()
            .iter()
            .all(|r| r.status == ClaimStatus::Pending));
        assert_eq!(sink.score(), 0);
        assert!(sink.review(2, ClaimStatus::Approved));
        assert_eq!(sink.score(), 3);
        assert!(sink.review(1, ClaimStatus::Rejected));
        assert_eq!(sink.score(), 3);
        assert!(!sink.review(3, ClaimStatus::Approved));
        assert_eq!(sink.history()[0].status, ClaimStatus::Rejected);
        assert_eq!(sink.history()[1].description, "Annual conference");
    }

    #[test]
    fn test_memory_sink_rejects_duplicates() {
        let mut sink = MemorySink::new();
        let claim = filled_form().build().unwrap();
        assert!(sink.submit(&claim).is_ok());
        let mut resubmitted = claim;
        resubmitted.attachment.name = String::from("copy.pdf");
        assert_eq!(
            sink.submit(&resubmitted),
            Err(SubmitError::Rejected(String::from(
                "an identical claim was already submitted"
            )))
        );
        assert_eq!(sink.history().len(), 1);
    }

    #[test]
    fn test_sample_history() {
        let sink = MemorySink::with_sample_history(date!(2026 - 10 - 19));
        let statuses = sink.history().iter().map(|r| r.status).collect::<Vec<_>>();
        assert_eq!(
            statuses,
            [
                ClaimStatus::Approved,
                ClaimStatus::Rejected,
                ClaimStatus::Approved,
                ClaimStatus::Pending,
            ]
        );
        // One point and three points approved
        assert_eq!(sink.score(), 4);
        assert_eq!(points_needed(sink.score()), 6);
        assert_eq!(sink.history()[3].start, date!(2026 - 10 - 13));
    }

    #[test]
    fn test_points_needed() {
        assert_eq!(points_needed(0), TARGET_POINTS);
        assert_eq!(points_needed(10), 0);
        assert_eq!(points_needed(14), 0);
    }
}
