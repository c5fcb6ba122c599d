//! GraphQL documents sent by [`super::GraphqlBackend`].

/// A named operation and the response field holding its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub field: &'static str,
    pub query: &'static str,
}

pub const LOGIN: Operation = Operation {
    name: "Login",
    field: "login",
    query: r#"mutation Login($loginInput: LoginInput!) {
  login(loginInput: $loginInput) {
    access_token
    user { id email fullName role createdAt }
  }
}"#,
};

pub const REGISTER: Operation = Operation {
    name: "Register",
    field: "register",
    query: r#"mutation Register($registerInput: RegisterInput!) {
  register(registerInput: $registerInput) {
    access_token
    user { id email fullName role createdAt }
  }
}"#,
};

pub const CURRENT_USER: Operation = Operation {
    name: "GetCurrentUser",
    field: "me",
    query: r#"query GetCurrentUser {
  me { id email fullName role createdAt }
}"#,
};

pub const MY_DOCUMENTS: Operation = Operation {
    name: "GetMyDocuments",
    field: "myDocuments",
    query: r#"query GetMyDocuments {
  myDocuments {
    id title description fileUrl userId createdAt updatedAt
    user { id email fullName }
  }
}"#,
};

pub const ALL_DOCUMENTS: Operation = Operation {
    name: "GetAllDocuments",
    field: "documents",
    query: r#"query GetAllDocuments {
  documents {
    id title description fileUrl userId createdAt updatedAt
    user { id email fullName }
  }
}"#,
};

pub const DOCUMENT: Operation = Operation {
    name: "GetDocument",
    field: "document",
    query: r#"query GetDocument($id: String!) {
  document(id: $id) {
    id title description fileUrl userId createdAt updatedAt
    user { id email fullName }
  }
}"#,
};

pub const CREATE_DOCUMENT: Operation = Operation {
    name: "CreateDocument",
    field: "createDocument",
    query: r#"mutation CreateDocument($createDocumentInput: CreateDocumentInput!) {
  createDocument(createDocumentInput: $createDocumentInput) {
    id title description fileUrl userId createdAt updatedAt
  }
}"#,
};

pub const UPDATE_DOCUMENT: Operation = Operation {
    name: "UpdateDocument",
    field: "updateDocument",
    query: r#"mutation UpdateDocument($updateDocumentInput: UpdateDocumentInput!) {
  updateDocument(updateDocumentInput: $updateDocumentInput) {
    id title description fileUrl userId createdAt updatedAt
  }
}"#,
};

pub const REMOVE_DOCUMENT: Operation = Operation {
    name: "DeleteDocument",
    field: "removeDocument",
    query: r#"mutation DeleteDocument($id: String!) {
  removeDocument(id: $id) { id title }
}"#,
};
