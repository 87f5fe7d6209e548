use bson::{oid::ObjectId, serde_helpers::chrono_datetime_as_bson_datetime};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// This module contains all user-related structs.
pub mod users {
    use super::*;

    /// # User
    /// A registered account. `email` is the login identifier; nothing at
    /// the collection level enforces its uniqueness.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct User {
        /// User's unique ObjectId
        pub _id: ObjectId,
        /// Login identifier
        pub email: String,
        /// Argon2 password hash, never the plaintext
        pub password: String,
    }

    impl User {
        /// Creates a new user from `email` and an already-hashed password.
        pub fn from<T>(email: T, password_hash: T) -> User
        where
            T: Into<String>,
        {
            User {
                _id: ObjectId::new(),
                email: email.into(),
                password: password_hash.into(),
            }
        }
    }

    /// Form body for POST: /register and POST: /login.
    #[derive(Debug, Deserialize)]
    pub struct CredentialsForm {
        pub email: String,
        pub password: String,
    }
}

/// This module contains all file-related structs.
pub mod files {
    use super::*;

    /// # File
    /// Metadata for one stored upload. The bytes live on disk at `path`;
    /// nothing ties the record to the file still existing there.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct File {
        /// The unique ObjectId of the file
        pub _id: ObjectId,
        /// Display name the file was uploaded under
        pub original_name: String,
        /// Server-local path the bytes were written to, stored verbatim
        pub path: String,
        /// Email of the uploading account (denormalized, not a relation)
        uploader: String,
        /// The DateTime<Utc> when the file was uploaded
        #[serde(with = "chrono_datetime_as_bson_datetime")]
        pub uploaded_at: DateTime<Utc>,
    }

    impl File {
        /// Creates a new file record from `original_name`, the stored
        /// `path` and the `uploader`'s email.
        pub fn from<T>(original_name: T, path: T, uploader: T) -> File
        where
            T: Into<String>,
        {
            File {
                _id: ObjectId::new(),
                original_name: original_name.into(),
                path: path.into(),
                uploader: uploader.into(),
                uploaded_at: Utc::now(),
            }
        }

        /// Email of the account that uploaded this file.
        pub fn uploader(&self) -> &str {
            &self.uploader
        }
    }
}

/// This module contains all link-related structs.
pub mod links {
    use super::*;

    /// # Link
    /// An external link posted to the dashboard. Immutable once created.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Link {
        /// The unique ObjectId of the link
        pub _id: ObjectId,
        /// Display title
        pub title: String,
        /// Target URL
        pub url: String,
        /// Email of the posting account (denormalized, not a relation)
        added_by: String,
        /// The DateTime<Utc> when the link was added
        #[serde(with = "chrono_datetime_as_bson_datetime")]
        pub added_at: DateTime<Utc>,
    }

    impl Link {
        /// Creates a new link from `title`, `url` and the poster's email.
        pub fn from<T>(title: T, url: T, added_by: T) -> Link
        where
            T: Into<String>,
        {
            Link {
                _id: ObjectId::new(),
                title: title.into(),
                url: url.into(),
                added_by: added_by.into(),
                added_at: Utc::now(),
            }
        }

        /// Email of the account that posted this link.
        pub fn added_by(&self) -> &str {
            &self.added_by
        }
    }

    /// Form body for POST: /add-link.
    #[derive(Debug, Deserialize)]
    pub struct LinkForm {
        pub title: String,
        pub url: String,
    }
}

#[cfg(test)]
mod tests {
    use super::files::File;
    use super::links::Link;
    use super::users::User;

    #[test]
    fn user_keeps_email_and_hash() {
        let user = User::from("a@example.com", "$argon2id$stub");
        assert_eq!(user.email, "a@example.com");
        assert_eq!(user.password, "$argon2id$stub");
    }

    #[test]
    fn file_record_keeps_uploader_email() {
        let file = File::from("notes.txt", "uploads/1-notes.txt", "a@example.com");
        assert_eq!(file.uploader(), "a@example.com");
        assert_eq!(file.original_name, "notes.txt");
        assert_eq!(file.path, "uploads/1-notes.txt");
    }

    #[test]
    fn file_timestamps_serialize_as_bson_datetime() {
        let file = File::from("notes.txt", "uploads/1-notes.txt", "a@example.com");
        let doc = bson::to_document(&file).unwrap();

        assert!(matches!(
            doc.get("uploaded_at"),
            Some(bson::Bson::DateTime(_))
        ));

        let back: File = bson::from_document(doc).unwrap();
        assert_eq!(back._id, file._id);
        assert_eq!(back.uploader(), "a@example.com");
    }

    #[test]
    fn link_record_keeps_poster_email() {
        let link = Link::from("Example", "https://example.com", "a@example.com");
        assert_eq!(link.added_by(), "a@example.com");

        let doc = bson::to_document(&link).unwrap();
        assert!(matches!(doc.get("added_at"), Some(bson::Bson::DateTime(_))));
    }
}
