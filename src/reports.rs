//! Builders under `/reports`.

use crate::abstractions::{ItemQueryParameters, NoQueryParameters};
use crate::models::ReportRoot;

crate::request_builder! {
    /// `/reports`: usage reports.
    pub struct ReportsRequestBuilder => "{+baseurl}/reports{?%24expand,%24select}";
}

crate::request_operations! {
    ReportsRequestBuilder {
        get(ItemQueryParameters) -> ReportRoot;
    }
}

impl ReportsRequestBuilder {
    /// Email activity counts over a reporting period such as `D7` or `D30`.
    pub fn get_email_activity_counts_with_period(
        &self,
        period: impl Into<String>,
    ) -> EmailActivityCountsRequestBuilder {
        self.base.indexed_child(
            "period",
            period,
            EmailActivityCountsRequestBuilder::from_parts,
        )
    }
}

crate::request_builder! {
    /// `getEmailActivityCounts(period='{period}')`: a CSV report stream.
    pub struct EmailActivityCountsRequestBuilder =>
        "{+baseurl}/reports/getEmailActivityCounts(period='{period}')";
}

crate::request_operations! {
    EmailActivityCountsRequestBuilder {
        /// Download the report. Graph redirects to a pre-authenticated CSV.
        get_bytes(NoQueryParameters);
    }
}
