//! Import template offered for download.

/// Byte-exact roster template: fixed header plus two sample users, CRLF
/// line endings. The empty `UpdatedBy` column parses back as
/// present-but-empty, not absent.
pub const TEMPLATE_CSV: &str = "UserName,Email,Password,Address,Contact,About,CreatedBy,UpdatedBy,PhotoPath,RoleId\r\n\
john_doe,john@example.com,123456,New York,01234567890,Sample user 1,Admin,,photos/john.jpg,1\r\n\
mary_smith,mary@example.com,pass789,Los Angeles,09876543210,Sample user 2,Admin,,photos/mary.jpg,2\r\n";

/// Suggested download name for the template.
pub const TEMPLATE_FILE_NAME: &str = "users-template.csv";
