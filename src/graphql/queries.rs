//! GraphQL documents for every live operation.

pub const LIST_DISCUSSIONS: &str = r#"
query($owner: String!, $repo: String!, $first: Int!, $after: String) {
  repository(owner: $owner, name: $repo) {
    discussions(first: $first, after: $after, orderBy: {field: UPDATED_AT, direction: DESC}) {
      pageInfo { hasNextPage endCursor }
      nodes {
        id number title body url createdAt updatedAt
        author { login avatarUrl url }
        category { id name emoji }
        labels(first: 5) { nodes { id name color } }
        comments { totalCount }
        reactions { totalCount }
      }
    }
  }
}
"#;

pub const GET_DISCUSSION: &str = r#"
query($owner: String!, $repo: String!, $number: Int!) {
  repository(owner: $owner, name: $repo) {
    discussion(number: $number) {
      id number title body bodyHTML url createdAt updatedAt
      author { login avatarUrl url }
      category { name emoji }
      labels(first: 10) { nodes { id name color } }
      comments(first: 100) {
        totalCount
        nodes {
          id body bodyHTML createdAt
          author { login avatarUrl url }
          replies(first: 50) {
            nodes {
              id body bodyHTML createdAt
              author { login avatarUrl url }
              reactions { totalCount }
            }
          }
          reactions { totalCount }
        }
      }
      reactions { totalCount }
    }
  }
}
"#;

pub const LIST_CATEGORIES: &str = r#"
query($owner: String!, $repo: String!) {
  repository(owner: $owner, name: $repo) {
    id
    discussionCategories(first: 20) {
      nodes { id name emoji description }
    }
  }
}
"#;

pub const LIST_LABELS: &str = r#"
query($owner: String!, $repo: String!) {
  repository(owner: $owner, name: $repo) {
    labels(first: 20) {
      nodes { id name color description }
    }
  }
}
"#;

pub const SEARCH_DISCUSSIONS: &str = r#"
query($query: String!, $first: Int!) {
  search(query: $query, type: DISCUSSION, first: $first) {
    discussionCount
    nodes {
      ... on Discussion {
        id number title body url createdAt updatedAt
        author { login avatarUrl url }
        category { id name emoji }
        labels(first: 5) { nodes { id name color } }
        comments { totalCount }
        reactions { totalCount }
      }
    }
  }
}
"#;

pub const REPOSITORY_ID: &str = r#"
query($owner: String!, $repo: String!) {
  repository(owner: $owner, name: $repo) { id }
}
"#;

pub const CREATE_DISCUSSION: &str = r#"
mutation($repositoryId: ID!, $categoryId: ID!, $title: String!, $body: String!) {
  createDiscussion(input: {
    repositoryId: $repositoryId, categoryId: $categoryId, title: $title, body: $body
  }) {
    discussion { id number }
  }
}
"#;

pub const ADD_COMMENT: &str = r#"
mutation($discussionId: ID!, $body: String!) {
  addDiscussionComment(input: { discussionId: $discussionId, body: $body }) {
    comment { id }
  }
}
"#;

pub const ADD_REACTION: &str = r#"
mutation($subjectId: ID!, $content: ReactionContent!) {
  addReaction(input: { subjectId: $subjectId, content: $content }) {
    reaction { id content }
  }
}
"#;

pub const REMOVE_REACTION: &str = r#"
mutation($subjectId: ID!, $content: ReactionContent!) {
  removeReaction(input: { subjectId: $subjectId, content: $content }) {
    reaction { id content }
  }
}
"#;

pub const PIN_DISCUSSION: &str = r#"
mutation($discussionId: ID!) {
  pinDiscussion(input: { discussionId: $discussionId }) {
    discussion { id isPinned }
  }
}
"#;

pub const UNPIN_DISCUSSION: &str = r#"
mutation($discussionId: ID!) {
  unpinDiscussion(input: { discussionId: $discussionId }) {
    discussion { id isPinned }
  }
}
"#;

pub const ADD_LABELS: &str = r#"
mutation($labelableId: ID!, $labelIds: [ID!]!) {
  addLabelsToLabelable(input: { labelableId: $labelableId, labelIds: $labelIds }) {
    labelable {
      ... on Discussion {
        id
        labels(first: 10) { nodes { id name color } }
      }
    }
  }
}
"#;

pub const VIEWER: &str = r#"
query {
  viewer { login name avatarUrl email }
}
"#;
