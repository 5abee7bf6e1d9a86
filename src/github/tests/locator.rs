//! Tests for repository, pull request, commit, and token wrappers.

use rstest::rstest;

use crate::github::error::HeraldError;
use crate::github::locator::{
    CommitSha, PersonalAccessToken, PullRequestNumber, RepositoryRef, short_sha,
};

const SHA: &str = "0123456789abcdef0123456789abcdef01234567";

fn repository() -> RepositoryRef {
    RepositoryRef::parse("octo/widgets").expect("repository should parse")
}

#[rstest]
#[case::padded("  octo/widgets ")]
#[case::plain("octo/widgets")]
fn repository_ref_parses_owner_and_name(#[case] input: &str) {
    let parsed = RepositoryRef::parse(input).expect("should parse");

    assert_eq!(parsed.owner().as_str(), "octo", "owner mismatch");
    assert_eq!(parsed.name().as_str(), "widgets", "name mismatch");
    assert_eq!(parsed.to_string(), "octo/widgets");
}

#[rstest]
#[case::missing_separator("widgets")]
#[case::empty_owner("/widgets")]
#[case::empty_name("octo/")]
#[case::nested("octo/widgets/extra")]
#[case::empty("")]
fn repository_ref_rejects_malformed_input(#[case] input: &str) {
    let error = RepositoryRef::parse(input).expect_err("should be rejected");

    assert_eq!(
        error,
        HeraldError::InvalidRepository {
            value: input.to_owned()
        }
    );
}

#[rstest]
fn endpoint_paths_are_scoped_to_the_repository() {
    let repo = repository();
    let number = PullRequestNumber::new(12).expect("number should be valid");
    let base = CommitSha::parse(SHA).expect("sha should parse");
    let head = CommitSha::parse(&"f".repeat(40)).expect("sha should parse");

    assert_eq!(repo.open_pulls_path(), "/repos/octo/widgets/pulls?state=open");
    assert_eq!(repo.pull_request_path(number), "/repos/octo/widgets/pulls/12");
    assert_eq!(
        repo.pull_request_commits_path(number),
        "/repos/octo/widgets/pulls/12/commits"
    );
    assert_eq!(
        repo.pull_request_files_path(number),
        "/repos/octo/widgets/pulls/12/files"
    );
    assert_eq!(
        repo.comments_path(number),
        "/repos/octo/widgets/issues/12/comments"
    );
    assert_eq!(
        repo.comment_path(99),
        "/repos/octo/widgets/issues/comments/99"
    );
    assert_eq!(
        repo.compare_path(&base, &head),
        format!("/repos/octo/widgets/compare/{SHA}...{}", "f".repeat(40))
    );
}

#[rstest]
#[case::valid("17", Some(17))]
#[case::zero("0", None)]
#[case::negative("-3", None)]
#[case::text("seventeen", None)]
fn pull_request_number_parses_positive_integers(#[case] input: &str, #[case] expected: Option<u64>) {
    let parsed = PullRequestNumber::parse(input).ok().map(PullRequestNumber::get);

    assert_eq!(parsed, expected);
}

#[rstest]
fn pull_request_number_displays_with_hash() {
    let number = PullRequestNumber::new(5).expect("number should be valid");

    assert_eq!(number.to_string(), "#5");
}

#[rstest]
#[case::too_short("0123456")]
#[case::too_long("0123456789abcdef0123456789abcdef012345678")]
#[case::not_hex("g123456789abcdef0123456789abcdef01234567")]
fn commit_sha_requires_forty_hex_chars(#[case] input: &str) {
    assert!(CommitSha::parse(input).is_err(), "{input} should be rejected");
}

#[rstest]
fn commit_sha_derives_short_form() {
    let sha = CommitSha::parse(SHA).expect("sha should parse");

    assert_eq!(sha.short(), "0123456");
    assert_eq!(short_sha(sha.as_str()), sha.short());
    assert!(!sha.is_null());
    assert!(CommitSha::parse(&"0".repeat(40)).expect("zeros parse").is_null());
}

#[rstest]
fn commit_sha_is_normalised_to_lowercase() {
    let upper = CommitSha::parse(&SHA.to_ascii_uppercase()).expect("uppercase sha should parse");

    assert_eq!(upper.as_str(), SHA);
    assert_eq!(upper, CommitSha::parse(SHA).expect("sha should parse"));
}

#[rstest]
fn token_is_trimmed_and_redacted() {
    let token = PersonalAccessToken::new("  ghp_secret \n").expect("token should be valid");

    assert_eq!(token.value(), "ghp_secret");
    assert!(!format!("{token:?}").contains("ghp_secret"));
    assert_eq!(
        PersonalAccessToken::new("   ").expect_err("blank token"),
        HeraldError::MissingToken
    );
}
