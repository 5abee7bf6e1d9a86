//! Tests for the summary and push flows against mocked gateways.

use std::time::Duration;

use mockall::predicate::eq;
use rstest::{fixture, rstest};
use url::Url;

use super::{RunOutcome, SKIP_MESSAGE, announce_push, refresh_summary};
use crate::config::{RunContext, RunMode};
use crate::github::error::HeraldError;
use crate::github::gateway::{MockCommentGateway, MockPullRequestGateway};
use crate::github::locator::{CommitSha, PersonalAccessToken, PullRequestNumber, RepositoryRef};
use crate::github::models::OpenPullRequest;
use crate::github::models::test_support::{comment, commit, file_change, sha_for, snapshot};
use crate::github::transport::RetryPolicy;
use crate::summary::{PUSH_MARKER, SUMMARY_MARKER};

fn sha(index: u64) -> CommitSha {
    CommitSha::parse(&sha_for(index)).expect("sha should parse")
}

fn number(value: u64) -> PullRequestNumber {
    PullRequestNumber::new(value).expect("number should be valid")
}

#[fixture]
fn context() -> RunContext {
    RunContext {
        repository: RepositoryRef::parse("octo/widgets").expect("repository should parse"),
        token: PersonalAccessToken::new("ghp_example").expect("token should be valid"),
        api_base: Url::parse("https://api.github.com").expect("URL should parse"),
        head_sha: Some(sha(0xbeef)),
        branch: Some("feature/retries".to_owned()),
        explicit_pr: None,
        before_sha: Some(sha(0xabc)),
        mode: RunMode::Summary,
        retry: RetryPolicy::without_delay(1),
        timeout: Duration::from_secs(1),
    }
}

fn pulls_with_open_pr() -> MockPullRequestGateway {
    let mut pulls = MockPullRequestGateway::new();
    pulls.expect_open_pull_requests().returning(|| {
        Ok(vec![OpenPullRequest {
            number: 5,
            head_sha: Some(sha_for(0xbeef)),
            head_ref: Some("feature/retries".to_owned()),
        }])
    });
    pulls
}

#[rstest]
fn summary_creates_comment_for_matched_pull_request(context: RunContext) {
    let mut pulls = pulls_with_open_pr();
    pulls
        .expect_pull_request()
        .with(eq(number(5)))
        .returning(|_| Ok(snapshot(5, 300, 50)));
    pulls
        .expect_pull_request_commits()
        .returning(|_| Ok(vec![commit(1, "Add retry loop")]));
    pulls
        .expect_pull_request_files()
        .returning(|_| Ok(vec![file_change("src/client.rs", 300, 50)]));
    pulls.expect_compare_commits().never();

    let mut comments = MockCommentGateway::new();
    comments.expect_issue_comments().returning(|_| Ok(Vec::new()));
    comments
        .expect_create_comment()
        .withf(|target, body| {
            *target == number(5)
                && body.starts_with(SUMMARY_MARKER)
                && body.contains("(🟨 medium)")
                && body.contains("- `0000001` Add retry loop")
        })
        .times(1)
        .returning(|_, body| Ok(comment(77, body)));

    let outcome = refresh_summary(&pulls, &comments, &context).expect("flow should succeed");

    assert_eq!(
        outcome,
        RunOutcome::Created {
            pull_request: number(5),
            comment_id: 77
        }
    );
    assert_eq!(outcome.to_string(), "Created comment 77 on pull request #5");
}

#[rstest]
fn summary_skips_when_no_pull_request_matches(mut context: RunContext) {
    context.head_sha = Some(sha(0xdead));
    context.branch = Some("unrelated".to_owned());
    let pulls = pulls_with_open_pr();
    let mut comments = MockCommentGateway::new();
    comments.expect_issue_comments().never();
    comments.expect_create_comment().never();

    let outcome = refresh_summary(&pulls, &comments, &context).expect("a miss is not an error");

    assert_eq!(outcome, RunOutcome::Skipped);
    assert_eq!(outcome.to_string(), SKIP_MESSAGE);
}

#[rstest]
fn summary_fetch_failure_writes_nothing(mut context: RunContext) {
    context.explicit_pr = Some(number(9));
    let mut pulls = MockPullRequestGateway::new();
    pulls.expect_open_pull_requests().never();
    pulls.expect_pull_request().returning(|_| {
        Err(HeraldError::RetriesExhausted {
            method: "GET".to_owned(),
            path: "/repos/octo/widgets/pulls/9".to_owned(),
            attempts: 3,
            status: Some(502),
            payload: "Bad Gateway".to_owned(),
        })
    });
    let mut comments = MockCommentGateway::new();
    comments.expect_issue_comments().never();

    let error = refresh_summary(&pulls, &comments, &context).expect_err("fetch failure is fatal");

    assert_eq!(error.status(), Some(502));
}

#[rstest]
fn push_note_updates_existing_note_with_compared_commits(mut context: RunContext) {
    context.mode = RunMode::Push;
    let mut pulls = pulls_with_open_pr();
    pulls
        .expect_compare_commits()
        .with(eq(sha(0xabc)), eq(sha(0xbeef)))
        .times(1)
        .returning(|_, _| Ok(vec![commit(0xbeef, "Tighten timeouts")]));
    pulls.expect_pull_request().never();

    let mut comments = MockCommentGateway::new();
    comments.expect_issue_comments().returning(|_| {
        Ok(vec![
            comment(3, &format!("{SUMMARY_MARKER}\nsummary")),
            comment(4, &format!("{PUSH_MARKER}\nold note")),
        ])
    });
    comments.expect_create_comment().never();
    comments
        .expect_update_comment()
        .withf(|id, body| {
            *id == 4
                && body.contains("📦 New push detected on `feature/retries` at `000beef`.")
                && body.contains("- `000beef` Tighten timeouts")
        })
        .times(1)
        .returning(|id, body| Ok(comment(id, body)));

    let outcome = announce_push(&pulls, &comments, &context).expect("flow should succeed");

    assert_eq!(
        outcome,
        RunOutcome::Updated {
            pull_request: number(5),
            comment_id: 4
        }
    );
}

#[rstest]
fn push_note_survives_compare_failure(mut context: RunContext) {
    context.branch = None;
    context.explicit_pr = Some(number(8));
    let mut pulls = MockPullRequestGateway::new();
    pulls.expect_compare_commits().returning(|_, _| {
        Err(HeraldError::Terminal {
            method: "GET".to_owned(),
            path: "/repos/octo/widgets/compare".to_owned(),
            status: 404,
            payload: "Not Found".to_owned(),
        })
    });

    let mut comments = MockCommentGateway::new();
    comments.expect_issue_comments().returning(|_| Ok(Vec::new()));
    comments
        .expect_create_comment()
        .withf(|_, body| {
            body == format!("{PUSH_MARKER}\n📦 New push detected on `?` at `000beef`.")
        })
        .times(1)
        .returning(|_, body| Ok(comment(1, body)));

    let outcome = announce_push(&pulls, &comments, &context).expect("compare failure is a warning");

    assert!(matches!(outcome, RunOutcome::Created { comment_id: 1, .. }));
}

#[rstest]
#[case::no_before(None)]
#[case::same_as_head(Some(0xbeef))]
fn push_note_skips_compare_without_a_range(mut context: RunContext, #[case] before: Option<u64>) {
    context.before_sha = before.map(sha);
    context.explicit_pr = Some(number(8));
    let mut pulls = MockPullRequestGateway::new();
    pulls.expect_compare_commits().never();

    let mut comments = MockCommentGateway::new();
    comments.expect_issue_comments().returning(|_| Ok(Vec::new()));
    comments
        .expect_create_comment()
        .withf(|_, body| !body.contains("Recent commits:"))
        .times(1)
        .returning(|_, body| Ok(comment(2, body)));

    announce_push(&pulls, &comments, &context).expect("flow should succeed");
}

#[rstest]
fn push_mode_requires_head_sha(mut context: RunContext) {
    context.head_sha = None;
    let mut pulls = MockPullRequestGateway::new();
    pulls.expect_open_pull_requests().never();
    let comments = MockCommentGateway::new();

    let error = announce_push(&pulls, &comments, &context).expect_err("head SHA is required");

    assert!(
        matches!(error, HeraldError::Configuration { .. }),
        "unexpected error {error:?}"
    );
}
