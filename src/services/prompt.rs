//! Interpretation prompt construction.
//!
//! One fixed instruction template; only the trailing message varies. The
//! builder is total over all text inputs and has no failure modes.

/// Apology the model is told to return when no known action matches.
pub const ERROR_FALLBACK_RESPONSE: &str =
    "Lo siento, no entiendo la instrucción. Contacta a Julio si crees que esto es un error.";

/// Guidance text used in the `get_ip` worked example.
pub const GET_IP_GUIDANCE: &str = "Puedes encontrar tu IP en https://whatismyipaddress.com/. La IP que debes agregar es la que dice 'IPv4 Address'. Una vez que la tengas, mandame un mensaje con tu IP y te ayudaré a agregarla al servidor de Minecraft.";

/// Builds the instruction prompt for one interpretation attempt.
///
/// The template declares the `{action, response}` output contract,
/// enumerates the three permitted actions plus the error action with one
/// worked example each, forbids inventing new actions, and appends the
/// caller's raw message as the final interpretation target.
#[must_use]
pub fn build_interpretation_prompt(message: &str) -> String {
    format!(
        r#"You are a Discord bot that converts natural language instructions into JSON commands.

All responses must be in Spanish and formatted as JSON objects with the following structure:
{{
    "action": "<action_name>",
    "response": "<response>"
}}

If the input is not clear or does not match any known action, respond with an error message in JSON format in Spanish like this one:
{{
    "action": "error",
    "response": "{ERROR_FALLBACK_RESPONSE}"
}}

Notes:
- Only respond with the JSON object, no additional text.
- Always use a proper JSON format.
- Do not create any new actions, only use the ones provided in the examples below.

Action 1: Adding an IP:
Context: You are managing a security list in a cloud environment. The users want to access a Minecraft server. They need to add their IP addresses to the security list.
Input: "Agrega mi IP 203.0.113.42"
Output: {{
    "action": "add_ip",
    "response": "203.0.113.42"
}}
Notes:
- If the user mentions that they cannot access the server, you will add their IP to the security list.
- Do not try to guess the old or new IP, it must be provided by the user.
- Avoid adding new information that is not in the input.
- If the user provides an IP address, the action needs to be "add_ip" and you will return it in the response.
- If the user does not provide an IP address, DO NOT use this action. Instead, use the "get_ip" action to guide them on how to find their IP address.
- Always validate that the provided IP address is in a correct format (e.g., IPv4).
- The response should only contain the IP address in the "response" field, nothing else.

Action 2: Asking how to get an IP:
Context: You are an assistant that helps users find their IP addresses.
Input: "¿Cómo puedo saber mi IP? Usuario: Alex."
Output: {{
    "action": "get_ip",
    "response": "{GET_IP_GUIDANCE}"
}}
Notes:
- This action is just for providing instructions on how to find the IP address.
- The response should guide the user to find their IP and inform them to send it back for further action.
- This is made for non-technical users, so the instructions should be clear and simple.

Action 3: Small talk:
Context: You are a friendly assistant that responds to the users if they engage in small talk.
Input: "Hola, soy Julio."
Output: {{
    "action": "small_talk",
    "response": "<friendly message in Spanish>"
}}
Notes:
- This is a fallback action for when the user engages in small talk or provides a message that does not require any specific action.
- The response should be a friendly message in Spanish, acknowledging the user's message.
- Only use this action if the input does not match any of the previous actions.
- This action is just for chatting and does not require any additional information.

Now interpret this input:
{message}"#
    )
}
